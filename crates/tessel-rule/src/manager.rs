//! Ordered rule pipelines.
//!
//! [`RuleManager::apply`] folds the state through every rule in order:
//! rule `i + 1` receives the output of rule `i`, and the final output is
//! the automaton's next state.

use crate::context::StepContext;
use crate::domain::Domain;
use crate::rule::Rule;
use log::{debug, trace};
use tessel_core::{ParameterSet, StepError};

/// An ordered list of rules applied as one composite transition.
pub struct RuleManager<K: Domain> {
    rules: Vec<Box<dyn Rule<K>>>,
}

impl<K: Domain> Default for RuleManager<K> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<K: Domain> RuleManager<K> {
    /// An empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule to the end of the pipeline.
    pub fn add(&mut self, rule: Box<dyn Rule<K>>) {
        debug!("adding rule '{}' at position {}", rule.name(), self.rules.len());
        self.rules.push(rule);
    }

    /// Replace the whole pipeline with a single rule.
    pub fn set(&mut self, rule: Box<dyn Rule<K>>) {
        debug!(
            "replacing {} rule(s) with '{}'",
            self.rules.len(),
            rule.name()
        );
        self.rules.clear();
        self.rules.push(rule);
    }

    /// Remove every rule.
    pub fn reset(&mut self) {
        debug!("clearing {} rule(s)", self.rules.len());
        self.rules.clear();
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the pipeline has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule names in application order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name())
    }

    /// Broadcast `params` to every rule.
    ///
    /// Stops at the first rule that rejects its new configuration; rules
    /// before it keep their updated values.
    pub fn update_parameters(&mut self, params: &ParameterSet) -> Result<(), StepError> {
        for rule in &mut self.rules {
            rule.update_parameters(params)
                .map_err(|reason| StepError::RuleFailed {
                    name: rule.name().to_string(),
                    reason,
                })?;
        }
        debug!(
            "broadcast {} parameter(s) to {} rule(s)",
            params.len(),
            self.rules.len()
        );
        Ok(())
    }

    /// Fold `current` through every rule in order.
    ///
    /// Returns `Err(StepError::EmptyPipeline)` if no rule is configured
    /// and `Err(StepError::RuleFailed)` naming the first rule that fails.
    pub fn apply(
        &mut self,
        current: &K::State,
        ctx: &mut StepContext<'_, K>,
    ) -> Result<K::State, StepError> {
        let (first, rest) = self
            .rules
            .split_first_mut()
            .ok_or(StepError::EmptyPipeline)?;
        let mut state = run_one(first.as_mut(), current, ctx)?;
        for rule in rest {
            state = run_one(rule.as_mut(), &state, ctx)?;
        }
        Ok(state)
    }
}

fn run_one<K: Domain>(
    rule: &mut dyn Rule<K>,
    state: &K::State,
    ctx: &mut StepContext<'_, K>,
) -> Result<K::State, StepError> {
    trace!("applying rule '{}' at generation {}", rule.name(), ctx.generation());
    rule.apply(state, ctx).map_err(|reason| StepError::RuleFailed {
        name: rule.name().to_string(),
        reason,
    })
}

impl<K: Domain> std::fmt::Debug for RuleManager<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Lattice;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use tessel_core::{Grid, RuleError, Shape, SimulatedClock};
    use tessel_space::NeighborSet;

    struct AddOne;

    impl Rule<Lattice> for AddOne {
        fn name(&self) -> &str {
            "add_one"
        }

        fn apply(
            &mut self,
            current: &Grid<f64>,
            _ctx: &mut StepContext<'_, Lattice>,
        ) -> Result<Grid<f64>, RuleError> {
            Ok(current.map(|&v| v + 1.0))
        }
    }

    struct Double {
        factor: f64,
    }

    impl Rule<Lattice> for Double {
        fn name(&self) -> &str {
            "double"
        }

        fn update_parameters(&mut self, params: &ParameterSet) -> Result<(), RuleError> {
            if let Some(&f) = params.get("factor") {
                if f < 0.0 {
                    return Err(RuleError::invalid_parameter("double", "factor", "negative"));
                }
                self.factor = f;
            }
            Ok(())
        }

        fn apply(
            &mut self,
            current: &Grid<f64>,
            _ctx: &mut StepContext<'_, Lattice>,
        ) -> Result<Grid<f64>, RuleError> {
            Ok(current.map(|&v| v * self.factor))
        }
    }

    fn run(manager: &mut RuleManager<Lattice>, values: Vec<f64>) -> Result<Grid<f64>, StepError> {
        let shape = Shape::new([values.len()]).unwrap();
        let state = Grid::from_vec(shape.clone(), values).unwrap();
        let env = NeighborSet::new(shape);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut clock = SimulatedClock::new();
        let mut ctx = StepContext::new(&env, &mut rng, &mut clock, 0);
        manager.apply(&state, &mut ctx)
    }

    #[test]
    fn empty_pipeline_is_an_error() {
        let mut m = RuleManager::<Lattice>::new();
        assert_eq!(run(&mut m, vec![1.0]), Err(StepError::EmptyPipeline));
    }

    #[test]
    fn rules_fold_in_order() {
        let mut m = RuleManager::new();
        m.add(Box::new(AddOne));
        m.add(Box::new(Double { factor: 2.0 }));
        assert_eq!(run(&mut m, vec![1.0, 2.0]).unwrap().as_slice(), &[4.0, 6.0]);

        let mut reversed = RuleManager::new();
        reversed.add(Box::new(Double { factor: 2.0 }));
        reversed.add(Box::new(AddOne));
        assert_eq!(
            run(&mut reversed, vec![1.0, 2.0]).unwrap().as_slice(),
            &[3.0, 5.0]
        );
    }

    #[test]
    fn set_replaces_and_reset_clears() {
        let mut m = RuleManager::new();
        m.add(Box::new(AddOne));
        m.add(Box::new(AddOne));
        m.set(Box::new(Double { factor: 3.0 }));
        assert_eq!(m.len(), 1);
        assert_eq!(m.names().collect::<Vec<_>>(), vec!["double"]);
        assert_eq!(run(&mut m, vec![2.0]).unwrap().as_slice(), &[6.0]);
        m.reset();
        assert!(m.is_empty());
    }

    #[test]
    fn parameters_broadcast_to_matching_rules() {
        let mut m = RuleManager::new();
        m.add(Box::new(AddOne));
        m.add(Box::new(Double { factor: 2.0 }));
        let mut params = ParameterSet::new();
        params.insert("factor".into(), 10.0);
        params.insert("unused".into(), 1.0);
        m.update_parameters(&params).unwrap();
        assert_eq!(run(&mut m, vec![0.0]).unwrap().as_slice(), &[10.0]);
    }

    #[test]
    fn rejected_parameter_names_the_rule() {
        let mut m = RuleManager::new();
        m.add(Box::new(Double { factor: 2.0 }));
        let mut params = ParameterSet::new();
        params.insert("factor".into(), -1.0);
        let err = m.update_parameters(&params).unwrap_err();
        assert!(matches!(err, StepError::RuleFailed { ref name, .. } if name == "double"));
        assert_eq!(run(&mut m, vec![1.0]).unwrap().as_slice(), &[2.0]);
    }
}
