//! Step replay against a mirror environment.
//!
//! Replaying a session's steps in key order against a fresh environment
//! reconstructs exactly the bindings the live evaluation produced. Keys
//! must arrive strictly increasing; anything else means the log was
//! reordered or truncated mid-statement and the mirror would diverge.

use stepline_runtime::{step_out_of_order, EvalResult};
use stepline_timeline::{Step, StepAction};

use crate::environment::Environment;

/// Apply recorded steps to a mirror environment, in key order.
pub fn replay(steps: &[Step], env: &mut Environment) -> EvalResult<()> {
    let mut last_key = None;
    for step in steps {
        if last_key.is_some_and(|last| step.key <= last) {
            return Err(step_out_of_order(step.key));
        }
        last_key = Some(step.key);
        match &step.action {
            StepAction::Noop => {}
            StepAction::Declare { name, value, kind } => {
                env.declare(name, value.clone(), *kind)?;
            }
        }
    }
    Ok(())
}
