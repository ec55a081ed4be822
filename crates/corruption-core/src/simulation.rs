//! Simulation Driver
//!
//! Owns the ECS world and runs generations as two single-threaded stage
//! schedules ("corrupt", then "procreate"), recomputing the feedback record
//! between and after them.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use corruption_events::{AgentSnapshot, AggregateSnapshot, GenerationReport};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::components::model::{Feedback, IdAllocator, ModelParams, StageOutcome};
use crate::config::ModelConfig;
use crate::error::SimError;
use crate::output::{collect_agents, population_size};
use crate::setup::spawn_first_generation;
use crate::systems::{
    corrupt_stage, corruption_index, income_bounds, national_income, procreate_stage,
    social_capital, total_capital,
};
use crate::SimRng;

/// Build a schedule that runs `systems` on the calling thread
fn stage_schedule<M>(systems: impl IntoSystemConfigs<M>) -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems(systems);
    schedule
}

/// The corruption model: parameters, population, scheduler and feedback state
///
/// Re-running with the same seed and parameters reproduces every generation
/// bit for bit: agents are always visited in creation order and all draws come
/// from the one seeded generator.
pub struct Simulation {
    world: World,
    corrupt: Schedule,
    procreate: Schedule,
    generation: u64,
    last_report: Option<GenerationReport>,
    failed_at: Option<u64>,
}

impl Simulation {
    /// Create a simulation with a generator seeded from `seed`.
    pub fn new(config: ModelConfig, seed: u64) -> Result<Self, SimError> {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    /// Create a simulation drawing from the given generator.
    pub fn with_rng(config: ModelConfig, rng: SmallRng) -> Result<Self, SimError> {
        config.validate()?;

        let mut world = World::new();
        world.insert_resource(Feedback::initial(&config));
        world.insert_resource(ModelParams(config));
        world.insert_resource(SimRng(rng));
        world.insert_resource(IdAllocator::new());
        world.insert_resource(StageOutcome::default());

        let summary = spawn_first_generation(&mut world);
        world.resource_mut::<Feedback>().total_capital = summary.total_capital;
        tracing::info!(
            agents = summary.total_agents,
            total_capital = summary.total_capital,
            mean_risk_aversion = summary.mean_risk_aversion,
            "spawned first generation"
        );

        Ok(Self {
            world,
            corrupt: stage_schedule(corrupt_stage),
            procreate: stage_schedule(procreate_stage),
            generation: 0,
            last_report: None,
            failed_at: None,
        })
    }

    /// Run one full generation and return its report.
    ///
    /// After a failure the simulation refuses to advance further.
    pub fn step(&mut self) -> Result<&GenerationReport, SimError> {
        if let Some(generation) = self.failed_at {
            return Err(SimError::Halted { generation });
        }

        let generation = self.generation + 1;
        match self.advance(generation) {
            Ok(report) => {
                self.generation = generation;
                Ok(&*self.last_report.insert(report))
            }
            Err(err) => {
                tracing::error!(generation, "generation failed: {}", err);
                self.failed_at = Some(generation);
                Err(err)
            }
        }
    }

    /// Run `generations` steps, returning their reports in order.
    pub fn run(&mut self, generations: u64) -> Result<Vec<GenerationReport>, SimError> {
        let mut reports = Vec::new();
        for _ in 0..generations {
            reports.push(self.step()?.clone());
        }
        Ok(reports)
    }

    fn advance(&mut self, generation: u64) -> Result<GenerationReport, SimError> {
        let alpha = self.config().alpha;

        self.run_stage(Stage::Corrupt)?;

        let acted = collect_agents(&self.world);
        let q = corruption_index(&acted)?;
        let bounds = income_bounds(&acted)?;
        let aggregates = AggregateSnapshot {
            population: acted.len(),
            total_capital: total_capital(&acted),
            corruption_index: q,
            national_income: national_income(&acted)?,
            income_min: bounds.min,
            income_max: bounds.max,
        };
        let report = GenerationReport::new(generation, aggregates, acted);
        if report.out_of_range_dishonesty > 0 {
            tracing::warn!(
                generation,
                agents = report.out_of_range_dishonesty,
                "dishonesty outside [0, 1]"
            );
        }

        {
            let mut feedback = self.world.resource_mut::<Feedback>();
            feedback.q = q;
            feedback.income_bounds = Some(bounds);
            feedback.set_total_capital(aggregates.total_capital, alpha);
        }

        self.run_stage(Stage::Procreate)?;

        let survivors = collect_agents(&self.world);
        let capital = total_capital(&survivors);
        self.world
            .resource_mut::<Feedback>()
            .set_total_capital(capital, alpha);

        tracing::info!(
            generation,
            population = survivors.len(),
            q,
            total_capital = capital,
            social_capital = social_capital(alpha, capital),
            national_income = aggregates.national_income,
            "generation complete"
        );

        Ok(report)
    }

    fn run_stage(&mut self, stage: Stage) -> Result<(), SimError> {
        let schedule = match stage {
            Stage::Corrupt => &mut self.corrupt,
            Stage::Procreate => &mut self.procreate,
        };
        schedule.run(&mut self.world);

        match self.world.resource_mut::<StageOutcome>().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Number of completed generations
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &ModelConfig {
        &self.world.resource::<ModelParams>().0
    }

    /// Current feedback record (q, S, income bounds, total capital)
    pub fn feedback(&self) -> Feedback {
        *self.world.resource::<Feedback>()
    }

    /// Report of the most recent generation
    pub fn last_report(&self) -> Option<&GenerationReport> {
        self.last_report.as_ref()
    }

    /// Live population in creation order
    pub fn agents(&self) -> Vec<AgentSnapshot> {
        collect_agents(&self.world)
    }

    /// Snapshot of a live agent
    pub fn agent(&self, agent_id: u64) -> Option<AgentSnapshot> {
        self.agents().into_iter().find(|a| a.agent_id == agent_id)
    }

    /// Parent of a live agent, which may itself have exited since
    pub fn parent_of(&self, agent_id: u64) -> Option<u64> {
        self.agent(agent_id).and_then(|a| a.parent_id)
    }

    pub fn population_size(&self) -> usize {
        population_size(&self.world)
    }

    /// Σ k over the live population, enumerated afresh
    pub fn total_capital(&self) -> f64 {
        total_capital(&self.agents())
    }
}

#[derive(Debug, Clone, Copy)]
enum Stage {
    Corrupt,
    Procreate,
}
