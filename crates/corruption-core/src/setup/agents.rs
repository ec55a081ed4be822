//! Agent Spawning
//!
//! Creates the first generation: founders with no parent and endowments
//! drawn from the configured uniform ranges.

use bevy_ecs::prelude::*;

use crate::components::agent::{AgentBundle, Endowment, Lineage};
use crate::components::model::{IdAllocator, ModelParams};
use crate::systems::decision::{draw_initial_capital, draw_risk_aversion};
use crate::SimRng;

/// Summary of the spawned first generation
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnSummary {
    pub total_agents: usize,
    pub total_capital: f64,
    pub mean_risk_aversion: f64,
}

/// Spawn `population` founders.
///
/// Each founder draws risk aversion first, then capital, so the random
/// stream lines up with offspring creation.
pub fn spawn_first_generation(world: &mut World) -> SpawnSummary {
    let config = world.resource::<ModelParams>().0.clone();

    world.resource_scope(|world, mut rng: Mut<SimRng>| {
        world.resource_scope(|world, mut ids: Mut<IdAllocator>| {
            let mut total_capital = 0.0;
            let mut total_risk_aversion = 0.0;

            for _ in 0..config.population {
                let risk_aversion = draw_risk_aversion(&config, &mut rng.0);
                let capital = draw_initial_capital(&config, &mut rng.0);
                total_capital += capital;
                total_risk_aversion += risk_aversion;

                world.spawn(AgentBundle::new(
                    ids.allocate(),
                    Lineage::founder(),
                    Endowment::new(risk_aversion, capital),
                ));
            }

            SpawnSummary {
                total_agents: config.population,
                total_capital,
                mean_risk_aversion: total_risk_aversion / config.population.max(1) as f64,
            }
        })
    })
}
