use serde::{Deserialize, Serialize};

use crate::rng::UniformSource;

/// One simulated month, in years.
pub const MONTH_IN_YEARS: f64 = 1.0 / 12.0;

/// Hydration or hunger below this costs health.
pub const DEPRIVATION_THRESHOLD: f64 = 20.0;
/// Hydration and hunger both at or above this restore health.
pub const COMFORT_THRESHOLD: f64 = 50.0;

const DEPRIVATION_PENALTY: f64 = 10.0;
const COMFORT_RECOVERY: f64 = 5.0;
const RECOVERY_SCALE: f64 = 200.0;

/// Bounds of a monthly decay draw, written as `[min, max]` in scenario files.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct DecayRange {
    pub min: f64,
    pub max: f64,
}

impl DecayRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn draw<R: UniformSource + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.uniform(self.min, self.max)
    }
}

impl Default for DecayRange {
    fn default() -> Self {
        Self::new(5.0, 15.0)
    }
}

impl From<[f64; 2]> for DecayRange {
    fn from([min, max]: [f64; 2]) -> Self {
        Self::new(min, max)
    }
}

impl From<DecayRange> for [f64; 2] {
    fn from(range: DecayRange) -> Self {
        [range.min, range.max]
    }
}

/// Per-month decay applied to every individual of a population.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DecayRates {
    pub water: DecayRange,
    pub hunger: DecayRange,
}

/// Initial values for an individual.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub age: f64,
    pub health: f64,
    pub hydration: f64,
    pub hunger: f64,
    pub diseased: bool,
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            age: 0.0,
            health: 100.0,
            hydration: 100.0,
            hunger: 100.0,
            diseased: false,
        }
    }
}

/// Display classification of an individual, highest priority first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Dead,
    Diseased,
    /// Hydration or hunger under the deprivation threshold.
    Deprived,
    Healthy,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Individual {
    age: f64,
    health: f64,
    hydration: f64,
    hunger: f64,
    diseased: bool,
    dead: bool,
}

impl Individual {
    pub fn new() -> Self {
        Self::from_vitals(Vitals::default())
    }

    pub fn from_vitals(vitals: Vitals) -> Self {
        Self {
            age: vitals.age,
            health: vitals.health,
            hydration: vitals.hydration,
            hunger: vitals.hunger,
            diseased: vitals.diseased,
            dead: false,
        }
    }

    pub fn age(&self) -> f64 {
        self.age
    }

    pub fn health(&self) -> f64 {
        self.health
    }

    pub fn hydration(&self) -> f64 {
        self.hydration
    }

    pub fn hunger(&self) -> f64 {
        self.hunger
    }

    pub fn is_diseased(&self) -> bool {
        self.diseased
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn condition(&self) -> Condition {
        if self.dead {
            Condition::Dead
        } else if self.diseased {
            Condition::Diseased
        } else if self.is_deprived() {
            Condition::Deprived
        } else {
            Condition::Healthy
        }
    }

    fn is_deprived(&self) -> bool {
        self.hydration < DEPRIVATION_THRESHOLD || self.hunger < DEPRIVATION_THRESHOLD
    }

    /// Advances this individual by one month. Dead individuals are left untouched.
    ///
    /// Draw order is fixed: water decay, hunger decay, then a recovery roll
    /// only when diseased.
    pub fn age_one_month<R: UniformSource + ?Sized>(&mut self, rng: &mut R, rates: &DecayRates) {
        if self.dead {
            return;
        }

        self.age += MONTH_IN_YEARS;
        self.hydration -= rates.water.draw(rng);
        self.hunger -= rates.hunger.draw(rng);

        if self.is_deprived() {
            self.health -= DEPRIVATION_PENALTY;
        }

        // Not an else branch: both checks read the post-decay values.
        if self.hydration >= COMFORT_THRESHOLD && self.hunger >= COMFORT_THRESHOLD {
            self.health += COMFORT_RECOVERY;
        }

        if self.diseased {
            // Unclamped; a negative chance means no recovery.
            let recovery_chance = (self.hydration + self.hunger) / RECOVERY_SCALE;
            if rng.uniform(0.0, 1.0) < recovery_chance {
                self.diseased = false;
            }
        }

        if self.health <= 0.0 {
            self.dead = true;
        }
    }
}

impl Default for Individual {
    fn default() -> Self {
        Self::new()
    }
}
