//! Snapshot Generation
//!
//! Reads the ECS world into `corruption-events` snapshot types. Reads go
//! through `World::iter_entities`, so a shared borrow of the world is enough.

use bevy_ecs::prelude::*;
use bevy_ecs::world::EntityRef;
use corruption_events::AgentSnapshot;

use crate::components::agent::{Agent, AgentId, Conduct, Endowment, GenerationsSurvived, Lineage};

fn snapshot_of(entity: EntityRef<'_>) -> Option<AgentSnapshot> {
    if !entity.contains::<Agent>() {
        return None;
    }
    let id = entity.get::<AgentId>()?;
    let lineage = entity.get::<Lineage>()?;
    let endowment = entity.get::<Endowment>()?;
    let conduct = entity.get::<Conduct>()?;
    let survived = entity.get::<GenerationsSurvived>()?;

    Some(AgentSnapshot {
        agent_id: id.0,
        parent_id: lineage.parent.map(|p| p.0),
        generations_survived: survived.0,
        risk_aversion: endowment.risk_aversion(),
        capital: endowment.capital(),
        dishonesty: conduct.dishonesty,
        income: conduct.income,
    })
}

/// Snapshot every live agent, in creation order.
pub fn collect_agents(world: &World) -> Vec<AgentSnapshot> {
    let mut agents: Vec<AgentSnapshot> = world.iter_entities().filter_map(snapshot_of).collect();
    agents.sort_by_key(|a| a.agent_id);
    agents
}

/// Number of live agents
pub fn population_size(world: &World) -> usize {
    world
        .iter_entities()
        .filter(|entity| entity.contains::<Agent>())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::agent::AgentBundle;

    #[test]
    fn test_collect_agents_sorted_by_id() {
        let mut world = World::new();
        for id in [5u64, 1, 3] {
            world.spawn(AgentBundle::new(
                AgentId(id),
                Lineage::child_of(AgentId(0)),
                Endowment::new(3.0, id as f64),
            ));
        }

        let agents = collect_agents(&world);
        let ids: Vec<u64> = agents.iter().map(|a| a.agent_id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
        assert_eq!(agents[2].capital, 5.0);
        assert_eq!(agents[0].parent_id, Some(0));
        assert!(agents.iter().all(|a| !a.has_acted()));
        assert_eq!(population_size(&world), 3);
    }

    #[test]
    fn test_non_agent_entities_are_ignored() {
        let mut world = World::new();
        world.spawn(AgentBundle::new(
            AgentId(0),
            Lineage::founder(),
            Endowment::new(3.0, 0.5),
        ));
        // carries an id but not the marker
        world.spawn((AgentId(1), Endowment::new(3.0, 1.0)));

        let shared: &World = &world;
        assert_eq!(collect_agents(shared).len(), 1);
        assert_eq!(population_size(shared), 1);
    }
}
