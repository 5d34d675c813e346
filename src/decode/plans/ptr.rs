//! The owned single-pointer plan: `Box<T>` runs `T`'s own plan and wraps
//! the completed value (§4.5). Failure is handled by ordinary `Drop` on the
//! inner plan, not a manual `cleanup` call — see `SPEC_FULL.md` §3.

use crate::decode::plan::{Decode, Plan, PlanError, PlanStep};
use crate::decode::token::Token;

#[derive(Default)]
pub struct BoxPlan<P> {
    inner: P,
}

impl<P: Plan> Plan for BoxPlan<P> {
    type Output = Box<P::Output>;

    fn feed(&mut self, token: Token) -> Result<PlanStep<Self::Output>, PlanError> {
        match self.inner.feed(token)? {
            PlanStep::Persists => Ok(PlanStep::Persists),
            PlanStep::Done(value) => Ok(PlanStep::Done(Box::new(value))),
        }
    }
}

impl<T: Decode> Decode for Box<T> {
    type Plan = BoxPlan<T::Plan>;
}
