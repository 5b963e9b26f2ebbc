//! Essential dignities of the seven classical planets.
//!
//! Rulership, detriment, exaltation and fall by sign. Mercury's exaltation
//! and fall differ between traditions, so they are table data rather than
//! fixed rules.

use crate::planet::PlanetId;
use crate::zodiac::ZodiacSign;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DignityType {
    Rulership,
    Detriment,
    Exaltation,
    Fall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dignity {
    #[serde(rename = "type")]
    pub dignity_type: DignityType,
    pub sign: ZodiacSign,
}

/// Signs in which one planet is dignified or debilitated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetDignities {
    pub domicile: Vec<ZodiacSign>,
    pub detriment: Vec<ZodiacSign>,
    pub exaltation: Option<ZodiacSign>,
    pub fall: Option<ZodiacSign>,
}

impl PlanetDignities {
    fn new(
        domicile: &[ZodiacSign],
        detriment: &[ZodiacSign],
        exaltation: ZodiacSign,
        fall: ZodiacSign,
    ) -> Self {
        Self {
            domicile: domicile.to_vec(),
            detriment: detriment.to_vec(),
            exaltation: Some(exaltation),
            fall: Some(fall),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DignityTable {
    // Indexed in `PlanetId::ALL` order.
    entries: [PlanetDignities; 7],
}

impl Default for DignityTable {
    fn default() -> Self {
        use ZodiacSign::*;
        Self {
            entries: [
                PlanetDignities::new(&[Leo], &[Aquarius], Aries, Libra),
                PlanetDignities::new(&[Cancer], &[Capricorn], Taurus, Scorpio),
                PlanetDignities::new(&[Gemini, Virgo], &[Sagittarius, Pisces], Virgo, Pisces),
                PlanetDignities::new(&[Taurus, Libra], &[Aries, Scorpio], Pisces, Virgo),
                PlanetDignities::new(&[Aries, Scorpio], &[Libra, Taurus], Capricorn, Cancer),
                PlanetDignities::new(&[Sagittarius, Pisces], &[Gemini, Virgo], Cancer, Capricorn),
                PlanetDignities::new(&[Capricorn, Aquarius], &[Cancer, Leo], Libra, Aries),
            ],
        }
    }
}

fn slot(planet: PlanetId) -> usize {
    planet as usize
}

impl DignityTable {
    /// Replace Mercury's exaltation and fall. `None` drops the dignity.
    pub fn with_mercury_exaltation(
        mut self,
        exaltation: Option<ZodiacSign>,
        fall: Option<ZodiacSign>,
    ) -> Self {
        let mercury = &mut self.entries[slot(PlanetId::Mercury)];
        mercury.exaltation = exaltation;
        mercury.fall = fall;
        self
    }

    pub fn entry(&self, planet: PlanetId) -> &PlanetDignities {
        &self.entries[slot(planet)]
    }

    /// Every dignity `planet` holds when placed in `sign`.
    pub fn dignities(&self, planet: PlanetId, sign: ZodiacSign) -> Vec<Dignity> {
        let entry = self.entry(planet);
        let mut result = Vec::new();
        let mut push = |dignity_type| result.push(Dignity { dignity_type, sign });

        if entry.domicile.contains(&sign) {
            push(DignityType::Rulership);
        } else if entry.detriment.contains(&sign) {
            push(DignityType::Detriment);
        }
        if entry.exaltation == Some(sign) {
            push(DignityType::Exaltation);
        } else if entry.fall == Some(sign) {
            push(DignityType::Fall);
        }
        result
    }
}

/// Traditional ruler of a sign.
pub fn sign_ruler(sign: ZodiacSign) -> PlanetId {
    use ZodiacSign::*;
    match sign {
        Aries | Scorpio => PlanetId::Mars,
        Taurus | Libra => PlanetId::Venus,
        Gemini | Virgo => PlanetId::Mercury,
        Cancer => PlanetId::Moon,
        Leo => PlanetId::Sun,
        Sagittarius | Pisces => PlanetId::Jupiter,
        Capricorn | Aquarius => PlanetId::Saturn,
    }
}
