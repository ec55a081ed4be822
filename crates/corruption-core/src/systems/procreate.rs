//! Procreate Stage
//!
//! Every agent spawns one offspring, then leaves unless it is a founder in
//! its first generation.

use bevy_ecs::prelude::*;

use crate::components::agent::{
    Agent, AgentBundle, AgentId, Conduct, Endowment, GenerationsSurvived, Lineage,
};
use crate::components::model::{Feedback, IdAllocator, ModelParams, StageOutcome};
use crate::error::SimError;
use crate::systems::decision::{draw_risk_aversion, inherited_capital};
use crate::SimRng;

/// One queued birth, plus whether the parent leaves afterwards
#[derive(Debug, Clone, Copy)]
struct Birth {
    parent_entity: Entity,
    parent: AgentId,
    endowment: Endowment,
    parent_retires: bool,
}

/// System: run `reproduce` for every agent in creation order
///
/// Offspring endowments are computed against the population as it stood at
/// stage start; spawns and removals go through `Commands` and land only once
/// the whole roster has been processed, so newborns never reproduce in the
/// generation they were born.
pub fn procreate_stage(
    mut commands: Commands,
    params: Res<ModelParams>,
    feedback: Res<Feedback>,
    mut rng: ResMut<SimRng>,
    mut ids: ResMut<IdAllocator>,
    mut outcome: ResMut<StageOutcome>,
    agents: Query<(Entity, &AgentId, &Lineage, &Conduct, &GenerationsSurvived), With<Agent>>,
) {
    let mut roster: Vec<(Entity, AgentId, Lineage, Conduct, GenerationsSurvived)> = agents
        .iter()
        .map(|(entity, id, lineage, conduct, survived)| {
            (entity, *id, *lineage, *conduct, *survived)
        })
        .collect();
    roster.sort_by_key(|(_, id, _, _, _)| *id);

    let births: Result<Vec<Birth>, SimError> = roster
        .iter()
        .map(|(entity, id, lineage, conduct, survived)| -> Result<Birth, SimError> {
            let income = conduct.income.ok_or(SimError::NoDecision { agent_id: id.0 })?;
            let risk_aversion = draw_risk_aversion(&params.0, &mut rng.0);
            let capital = inherited_capital(*id, income, &params.0, &feedback, &mut rng.0)?;
            Ok(Birth {
                parent_entity: *entity,
                parent: *id,
                endowment: Endowment::new(risk_aversion, capital),
                parent_retires: survived.retires_after_reproducing(lineage),
            })
        })
        .collect();

    let births = match births {
        Ok(births) => births,
        Err(err) => {
            tracing::error!("Procreate stage aborted: {}", err);
            outcome.fail(err);
            return;
        }
    };

    let mut retired = 0usize;
    for birth in &births {
        let child = ids.allocate();
        commands.spawn(AgentBundle::new(
            child,
            Lineage::child_of(birth.parent),
            birth.endowment,
        ));
        if birth.parent_retires {
            commands.entity(birth.parent_entity).despawn();
            retired += 1;
        }
    }

    tracing::debug!(born = births.len(), retired, "procreate stage complete");
}
