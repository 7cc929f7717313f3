use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::individual::{Condition, DecayRates, Individual};
use crate::rng::UniformSource;

/// Aggregate view of a population after a month.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStatistics {
    pub month: u32,
    /// Size of the original cohort, dead individuals included.
    pub population_size: usize,
    /// Health summed over the living, divided by the whole cohort.
    pub average_health: f64,
    pub diseased_count: usize,
}

impl fmt::Display for MonthlyStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Month {}: Population = {}, Avg Health = {:.2}, Diseased = {}",
            self.month, self.population_size, self.average_health, self.diseased_count
        )
    }
}

/// Head count per [`Condition`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Census {
    pub healthy: usize,
    pub deprived: usize,
    pub diseased: usize,
    pub dead: usize,
}

impl Census {
    pub fn alive(&self) -> usize {
        self.healthy + self.deprived + self.diseased
    }

    pub fn total(&self) -> usize {
        self.alive() + self.dead
    }
}

/// A fixed-size cohort advanced one month at a time.
///
/// Individuals are never removed; death is a flag on the individual.
#[derive(Clone, Debug)]
pub struct Population {
    individuals: Vec<Individual>,
    month: u32,
    rates: DecayRates,
}

impl Population {
    pub fn new(initial_population: usize) -> Self {
        Self::with_rates(initial_population, DecayRates::default())
    }

    pub fn with_rates(initial_population: usize, rates: DecayRates) -> Self {
        Self::from_individuals(
            (0..initial_population).map(|_| Individual::new()).collect(),
            rates,
        )
    }

    /// Builds a population from explicitly constructed individuals.
    pub fn from_individuals(individuals: Vec<Individual>, rates: DecayRates) -> Self {
        Self {
            individuals,
            month: 0,
            rates,
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn rates(&self) -> &DecayRates {
        &self.rates
    }

    pub fn simulate_month<R: UniformSource + ?Sized>(&mut self, rng: &mut R) {
        self.month += 1;
        let mut deaths = 0_usize;
        let mut recoveries = 0_usize;
        for individual in &mut self.individuals {
            let was_dead = individual.is_dead();
            let was_diseased = individual.is_diseased();
            individual.age_one_month(rng, &self.rates);
            if !was_dead && individual.is_dead() {
                deaths += 1;
            }
            if was_diseased && !individual.is_diseased() {
                recoveries += 1;
            }
        }
        if deaths > 0 || recoveries > 0 {
            debug!(
                "month {}: {} died, {} recovered",
                self.month, deaths, recoveries
            );
        }
    }

    pub fn statistics(&self) -> MonthlyStatistics {
        let population_size = self.individuals.len();
        let living_health: f64 = self
            .individuals
            .iter()
            .filter(|individual| !individual.is_dead())
            .map(Individual::health)
            .sum();
        let average_health = if population_size > 0 {
            living_health / population_size as f64
        } else {
            0.0
        };
        let diseased_count = self
            .individuals
            .iter()
            .filter(|individual| individual.is_diseased())
            .count();

        MonthlyStatistics {
            month: self.month,
            population_size,
            average_health,
            diseased_count,
        }
    }

    pub fn census(&self) -> Census {
        let mut census = Census::default();
        for individual in &self.individuals {
            match individual.condition() {
                Condition::Healthy => census.healthy += 1,
                Condition::Deprived => census.deprived += 1,
                Condition::Diseased => census.diseased += 1,
                Condition::Dead => census.dead += 1,
            }
        }
        census
    }

    /// Advances `months` times, handing the statistics of each month to `on_month`.
    pub fn run<R, F>(&mut self, months: u32, rng: &mut R, mut on_month: F)
    where
        R: UniformSource + ?Sized,
        F: FnMut(&MonthlyStatistics),
    {
        for _ in 0..months {
            self.simulate_month(rng);
            on_month(&self.statistics());
        }
    }
}
