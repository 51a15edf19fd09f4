//! The engine facade used by hosts.

use std::sync::Arc;

use lb_core::{Context, Identifier};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::Value;

use crate::config::EngineConfig;
use crate::definition::OutcomeDefinition;
use crate::error::OutcomeResult;
use crate::host::Host;
use crate::outcome::Outcome;
use crate::registry::{LoadReport, OutcomeRegistry};
use crate::scheduler::{DelayScheduler, Ticket};

/// What [`OutcomeEngine::trigger`] did with an outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum Triggered {
    /// Ran immediately.
    Executed(Outcome),
    /// Queued behind its delay.
    Scheduled(Ticket),
}

/// Registry, scheduler and selection RNG behind one API.
#[derive(Debug)]
pub struct OutcomeEngine {
    registry: OutcomeRegistry,
    scheduler: DelayScheduler,
    rng: StdRng,
    config: EngineConfig,
}

impl Default for OutcomeEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl OutcomeEngine {
    /// An engine with an empty registry.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            registry: OutcomeRegistry::new(config.registry.clone()),
            scheduler: DelayScheduler::new(),
            rng: StdRng::seed_from_u64(config.seed),
            config,
        }
    }

    /// The configuration the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The registry.
    pub fn registry(&self) -> &OutcomeRegistry {
        &self.registry
    }

    /// The scheduler.
    pub fn scheduler(&self) -> &DelayScheduler {
        &self.scheduler
    }

    /// Replace all loaded definitions.
    pub fn load_definitions<I>(&mut self, documents: I) -> LoadReport
    where
        I: IntoIterator<Item = (Identifier, Value)>,
    {
        self.registry.load_definitions(documents)
    }

    /// Draw a definition from the random partition using the engine's RNG.
    pub fn select_random(&mut self, bias: i32) -> OutcomeResult<Arc<OutcomeDefinition>> {
        self.registry.select_random(&mut self.rng, bias)
    }

    /// Find a definition by identifier.
    pub fn lookup(&self, id: &Identifier) -> OutcomeResult<Arc<OutcomeDefinition>> {
        self.registry.lookup(id)
    }

    /// Resolve a definition against `ctx`.
    pub fn resolve(&self, def: &OutcomeDefinition, ctx: &mut Context) -> OutcomeResult<Outcome> {
        Outcome::resolve(def, ctx)
    }

    /// Execute an outcome right away.
    pub fn execute(&self, outcome: &Outcome, ctx: &mut Context, host: &mut dyn Host) {
        outcome.execute(ctx, host);
    }

    /// Queue an outcome behind `delay` ticks.
    pub fn schedule(&mut self, outcome: Outcome, ctx: Context, delay: u32) -> Ticket {
        self.scheduler.schedule(outcome, ctx, delay)
    }

    /// Drop a scheduled outcome.
    pub fn cancel(&mut self, ticket: Ticket) -> bool {
        self.scheduler.cancel(ticket)
    }

    /// Advance the scheduler by one host tick.
    pub fn advance(&mut self, host: &mut dyn Host) -> usize {
        self.scheduler.advance(host)
    }

    /// Resolve `def`, then run it now or schedule it by its resolved delay.
    pub fn trigger(
        &mut self,
        def: &OutcomeDefinition,
        mut ctx: Context,
        host: &mut dyn Host,
    ) -> OutcomeResult<Triggered> {
        let outcome = Outcome::resolve(def, &mut ctx)?;
        if outcome.base.delay > 0 {
            let delay = outcome.base.delay;
            Ok(Triggered::Scheduled(self.schedule(outcome, ctx, delay)))
        } else {
            outcome.execute(&mut ctx, host);
            Ok(Triggered::Executed(outcome))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{OutcomeError, Partition};
    use crate::host::{HostEvent, RecordingHost};
    use lb_core::{Actor, BlockPos, Vec3};
    use serde_json::json;
    use uuid::Uuid;

    fn id(s: &str) -> Identifier {
        Identifier::parse(s).unwrap()
    }

    fn engine() -> OutcomeEngine {
        let mut engine = OutcomeEngine::new(EngineConfig::default().with_seed(11));
        let report = engine.load_definitions([
            (
                id("luckbox:speed"),
                json!({"type": "effect", "luck": 2, "status_effect": {"id": "speed", "duration": 200}}),
            ),
            (
                id("luckbox:thunder"),
                json!({"type": "sound", "luck": -1, "delay": "randomBetween(2,2)", "sound_event": "entity.lightning_bolt.thunder"}),
            ),
            (
                id("luckbox:nonrandom/fanfare"),
                json!({"type": "sound", "sound_event": "ui.toast.challenge_complete", "pos": "{playerX},{playerY}+1,{playerZ}"}),
            ),
        ]);
        assert!(report.skipped.is_empty());
        engine
    }

    fn ctx() -> Context {
        Context::new(BlockPos::new(0, 64, 0), 3)
            .with_actor(Actor::new("Alex", Uuid::nil(), Vec3::new(2.0, 64.0, 2.0)))
    }

    #[test]
    fn trigger_runs_undelayed_outcome() {
        let mut engine = engine();
        let mut host = RecordingHost::new();
        let def = engine.lookup(&id("luckbox:nonrandom/fanfare")).unwrap();
        let triggered = engine.trigger(&def, ctx(), &mut host).unwrap();

        assert!(matches!(triggered, Triggered::Executed(_)));
        let [HostEvent::Sound(emission)] = host.events.as_slice() else {
            panic!("expected one sound, got {:?}", host.events);
        };
        assert_eq!(emission.pos, Vec3::new(2.0, 65.0, 2.0));
    }

    #[test]
    fn trigger_schedules_delayed_outcome() {
        let mut engine = engine();
        let mut host = RecordingHost::new();
        let def = engine.lookup(&id("luckbox:thunder")).unwrap();
        let Triggered::Scheduled(ticket) = engine.trigger(&def, ctx(), &mut host).unwrap() else {
            panic!("expected the outcome to be scheduled");
        };
        assert!(host.events.is_empty());
        assert_eq!(engine.scheduler().remaining(ticket), Some(2));

        assert_eq!(engine.advance(&mut host), 0);
        assert_eq!(engine.advance(&mut host), 1);
        assert_eq!(host.events.len(), 1);
    }

    #[test]
    fn cancelled_trigger_never_fires() {
        let mut engine = engine();
        let mut host = RecordingHost::new();
        let def = engine.lookup(&id("luckbox:thunder")).unwrap();
        let Triggered::Scheduled(ticket) = engine.trigger(&def, ctx(), &mut host).unwrap() else {
            panic!("expected the outcome to be scheduled");
        };
        assert!(engine.cancel(ticket));
        for _ in 0..5 {
            engine.advance(&mut host);
        }
        assert!(host.events.is_empty());
    }

    #[test]
    fn random_selection_stays_in_random_partition() {
        let mut engine = engine();
        for _ in 0..200 {
            let def = engine.select_random(5).unwrap();
            assert_ne!(def.id, id("luckbox:nonrandom/fanfare"));
        }
    }

    #[test]
    fn same_seed_same_draws() {
        let mut a = engine();
        let mut b = engine();
        let draws_a: Vec<_> = (0..20).map(|_| a.select_random(3).unwrap().id.clone()).collect();
        let draws_b: Vec<_> = (0..20).map(|_| b.select_random(3).unwrap().id.clone()).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn empty_engine_errors() {
        let mut engine = OutcomeEngine::default();
        assert_eq!(
            engine.select_random(0).unwrap_err(),
            OutcomeError::RegistryEmpty(Some(Partition::Random))
        );
        assert_eq!(
            engine.lookup(&id("luckbox:speed")).unwrap_err(),
            OutcomeError::RegistryEmpty(None)
        );
    }

    #[test]
    fn execute_and_schedule_directly() {
        let mut engine = engine();
        let mut host = RecordingHost::new();
        let def = engine.lookup(&id("luckbox:speed")).unwrap();
        let mut ctx = ctx();
        let outcome = engine.resolve(&def, &mut ctx).unwrap();

        engine.execute(&outcome, &mut ctx, &mut host);
        let ticket = engine.schedule(outcome, ctx, 1);
        assert_eq!(engine.scheduler().len(), 1);
        assert_eq!(engine.advance(&mut host), 1);
        assert_eq!(engine.scheduler().remaining(ticket), None);
        assert_eq!(host.events.len(), 2);
        assert!(matches!(host.events[0], HostEvent::StatusEffect { .. }));
    }
}
