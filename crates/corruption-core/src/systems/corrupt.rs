//! Corrupt Stage
//!
//! Every agent chooses a dishonesty level and earns an income.

use bevy_ecs::prelude::*;

use crate::components::agent::{Agent, AgentId, Conduct, Endowment, GenerationsSurvived};
use crate::components::model::{Feedback, ModelParams, StageOutcome};
use crate::error::SimError;
use crate::systems::decision::{advance_generation, Decision};
use crate::SimRng;

/// System: run `advance_generation` for every agent in creation order
///
/// All decisions are computed before any is written back, so a singular
/// agent leaves the whole population as it was.
pub fn corrupt_stage(
    params: Res<ModelParams>,
    feedback: Res<Feedback>,
    mut rng: ResMut<SimRng>,
    mut outcome: ResMut<StageOutcome>,
    mut agents: Query<
        (Entity, &AgentId, &Endowment, &mut Conduct, &mut GenerationsSurvived),
        With<Agent>,
    >,
) {
    let mut roster: Vec<(Entity, AgentId, Endowment)> = agents
        .iter()
        .map(|(entity, id, endowment, _, _)| (entity, *id, *endowment))
        .collect();
    roster.sort_by_key(|(_, id, _)| *id);

    let decisions: Result<Vec<(Entity, Decision)>, SimError> = roster
        .iter()
        .map(|(entity, id, endowment)| {
            advance_generation(*id, endowment, &params.0, &feedback, &mut rng.0)
                .map(|decision| (*entity, decision))
        })
        .collect();

    let decisions = match decisions {
        Ok(decisions) => decisions,
        Err(err) => {
            tracing::error!("Corrupt stage aborted: {}", err);
            outcome.fail(err);
            return;
        }
    };

    for (entity, decision) in &decisions {
        if let Ok((_, _, _, mut conduct, mut survived)) = agents.get_mut(*entity) {
            conduct.dishonesty = Some(decision.dishonesty);
            conduct.income = Some(decision.income);
            survived.0 += 1;
        }
    }

    tracing::debug!(agents = decisions.len(), "corrupt stage complete");
}
