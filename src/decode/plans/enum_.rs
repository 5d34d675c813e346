//! The tagged-variant plan: a four-state machine (`Start`/`Label`/`Payload`/
//! `End`) over a compile-time variant map, the union-shaped counterpart to
//! `struct_.rs`'s dictionary-shaped one.
//!
//! A tagged-variant value is a `Record` whose label names the variant and
//! whose sole field is the payload — `<"variant-name" payload>` — built on
//! the encode side by [`union_value`](crate::encode::union_value). As with
//! `syrup_record!`, Rust's lack of runtime schema reflection means this is
//! realized as a declarative macro rather than a derive.

/// Declares a tagged-variant enum together with its
/// [`Decode`](crate::decode::plan::Decode) plan and
/// [`Encode`](crate::encode::Encode) impl.
///
/// ```ignore
/// syrup_enum! {
///     pub enum Shape {
///         Circle(f64),
///         Point(crate::value::Value),
///     }
/// }
/// ```
///
/// Expands to a plain enum plus a `ShapePlan` implementing the four-state
/// plan: `Start` requires `RecStart`; `Label` runs a `Symbol` plan and
/// matches the result against the declared variant names
/// (`UnknownVariant` otherwise); `Payload` runs the matched variant's own
/// plan; `End` requires `RecEnd`.
#[macro_export]
macro_rules! syrup_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident ( $ty:ty )),+ $(,)?
        }
    ) => {
        $crate::paste! {
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq)]
            $vis enum $name {
                $($variant($ty)),+
            }

            impl $crate::encode::Encode for $name {
                fn to_value(&self) -> $crate::value::Value {
                    match self {
                        $($name::$variant(payload) => {
                            $crate::encode::union_value(stringify!($variant), $crate::encode::Encode::to_value(payload))
                        }),+
                    }
                }
            }

            enum [<$name PlanPayload>] {
                $([<$variant>](<$ty as $crate::decode::plan::Decode>::Plan)),+
            }

            enum [<$name PlanPhase>] {
                Start,
                Label,
                Payload([<$name PlanPayload>]),
                End($name),
            }

            $vis struct [<$name Plan>] {
                phase: [<$name PlanPhase>],
                label_plan: <$crate::value::Symbol as $crate::decode::plan::Decode>::Plan,
            }

            impl Default for [<$name Plan>] {
                fn default() -> Self {
                    Self {
                        phase: [<$name PlanPhase>]::Start,
                        label_plan: Default::default(),
                    }
                }
            }

            impl $crate::decode::plan::Plan for [<$name Plan>] {
                type Output = $name;

                fn feed(
                    &mut self,
                    token: $crate::decode::token::Token,
                ) -> Result<$crate::decode::plan::PlanStep<Self::Output>, $crate::decode::plan::PlanError> {
                    use $crate::decode::plan::{Plan as _, PlanError, PlanStep};
                    use $crate::decode::token::Token;

                    match &mut self.phase {
                        [<$name PlanPhase>]::Start => {
                            if !matches!(token, Token::RecStart) {
                                return Err(PlanError::UnexpectedToken { expected: "record start" });
                            }
                            self.phase = [<$name PlanPhase>]::Label;
                            Ok(PlanStep::Persists)
                        }
                        [<$name PlanPhase>]::Label => {
                            match self.label_plan.feed(token)? {
                                PlanStep::Persists => Ok(PlanStep::Persists),
                                PlanStep::Done(name) => {
                                    let payload = match name.as_str() {
                                        $(stringify!($variant) => {
                                            [<$name PlanPayload>]::[<$variant>](Default::default())
                                        })+
                                        other => return Err(PlanError::UnknownVariant(other.to_owned())),
                                    };
                                    self.phase = [<$name PlanPhase>]::Payload(payload);
                                    Ok(PlanStep::Persists)
                                }
                            }
                        }
                        [<$name PlanPhase>]::Payload(payload) => match payload {
                            $([<$name PlanPayload>]::[<$variant>](plan) => match plan.feed(token)? {
                                PlanStep::Persists => Ok(PlanStep::Persists),
                                PlanStep::Done(value) => {
                                    self.phase = [<$name PlanPhase>]::End($name::$variant(value));
                                    Ok(PlanStep::Persists)
                                }
                            }),+
                        },
                        [<$name PlanPhase>]::End(_) => {
                            if !matches!(token, Token::RecEnd) {
                                return Err(PlanError::UnexpectedToken { expected: "record end" });
                            }
                            match std::mem::replace(&mut self.phase, [<$name PlanPhase>]::Start) {
                                [<$name PlanPhase>]::End(value) => Ok(PlanStep::Done(value)),
                                _ => unreachable!("matched End(_) above"),
                            }
                        }
                    }
                }
            }

            impl $crate::decode::plan::Decode for $name {
                type Plan = [<$name Plan>];
            }
        }
    };
}
