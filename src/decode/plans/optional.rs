//! The `Optional` plan: `Boolean(false)` means absent, `Boolean(true)` is a
//! hard error, anything else forwards to the inner plan (§4.5).

use crate::decode::plan::{Decode, Plan, PlanError, PlanStep};
use crate::decode::token::Token;

pub struct OptionalPlan<P> {
    inner: Option<P>,
}

impl<P> Default for OptionalPlan<P> {
    fn default() -> Self {
        Self { inner: None }
    }
}

impl<P: Plan + Default> Plan for OptionalPlan<P> {
    type Output = Option<P::Output>;

    fn feed(&mut self, token: Token) -> Result<PlanStep<Self::Output>, PlanError> {
        match &mut self.inner {
            None => {
                if matches!(token, Token::Boolean(false)) {
                    return Ok(PlanStep::Done(None));
                }
                if matches!(token, Token::Boolean(true)) {
                    return Err(PlanError::UnexpectedToken { expected: "inner value or false" });
                }
                let mut inner = P::default();
                match inner.feed(token)? {
                    PlanStep::Done(value) => Ok(PlanStep::Done(Some(value))),
                    PlanStep::Persists => {
                        self.inner = Some(inner);
                        Ok(PlanStep::Persists)
                    }
                }
            }
            Some(inner) => match inner.feed(token)? {
                PlanStep::Done(value) => Ok(PlanStep::Done(Some(value))),
                PlanStep::Persists => Ok(PlanStep::Persists),
            },
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    type Plan = OptionalPlan<T::Plan>;
}
