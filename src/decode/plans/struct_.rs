//! The struct / dictionary-typed plan: a four-state machine
//! (`Start`/`Key`/`Value`/`End`) over a compile-time field map.
//!
//! Rust has no runtime type reflection, so the "compile-time schema
//! reflection" the distilled spec's Design Notes call for is realized as the
//! [`syrup_record!`](crate::syrup_record) declarative macro: given a struct
//! shape, it emits both the plain data struct and a hand-shaped plan type
//! driving exactly the automaton this module documents. `paste` (inherited
//! from the teacher's dev-dependencies, promoted here to an ordinary
//! dependency — see `DESIGN.md`) supplies the identifier concatenation
//! (`{Name}Plan`, `{Name}PlanField`) macro_rules cannot do on its own.

/// Declares a record-shaped type together with its [`Decode`](crate::decode::plan::Decode)
/// plan and [`Encode`](crate::encode::Encode) impl.
///
/// ```ignore
/// syrup_record! {
///     pub struct Point as "point" {
///         p1: u32,
///         p2: i32,
///         p3: crate::bytes::Bytes,
///     }
/// }
/// ```
///
/// Expands to a plain struct plus a `PointPlan` implementing the four-state
/// struct plan: `Start` requires `DictStart`; `Key` runs a `Symbol` plan and
/// matches the result against the declared field names (`KeyFoundBefore` on
/// repeat, `UnknownKey` otherwise); `Value` runs the matched field's own
/// plan and records its presence bit; reaching `DictEnd` before every bit is
/// set raises `MissingKey`.
#[macro_export]
macro_rules! syrup_record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident as $label:literal {
            $($field:ident : $ty:ty),+ $(,)?
        }
    ) => {
        $crate::paste! {
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq)]
            $vis struct $name {
                $(pub $field: $ty),+
            }

            impl $crate::encode::Encode for $name {
                const RECORD_LABEL: &'static str = $label;

                fn to_value(&self) -> $crate::value::Value {
                    $crate::encode::struct_value(vec![
                        $((stringify!($field), $crate::encode::Encode::to_value(&self.$field))),+
                    ])
                }
            }

            enum [<$name PlanField>] {
                $([<$field:camel>](<$ty as $crate::decode::plan::Decode>::Plan)),+
            }

            enum [<$name PlanPhase>] {
                Start,
                Key,
                Value([<$name PlanField>]),
            }

            $vis struct [<$name Plan>] {
                phase: [<$name PlanPhase>],
                key_plan: <$crate::value::Symbol as $crate::decode::plan::Decode>::Plan,
                key_started: bool,
                $($field: Option<$ty>),+
            }

            impl Default for [<$name Plan>] {
                fn default() -> Self {
                    Self {
                        phase: [<$name PlanPhase>]::Start,
                        key_plan: Default::default(),
                        key_started: false,
                        $($field: None),+
                    }
                }
            }

            impl [<$name Plan>] {
                fn missing_key(&self) -> Option<&'static str> {
                    $(if self.$field.is_none() { return Some(stringify!($field)); })+
                    None
                }

                fn finish(&mut self) -> Result<$name, $crate::decode::plan::PlanError> {
                    if let Some(missing) = self.missing_key() {
                        return Err($crate::decode::plan::PlanError::MissingKey(missing));
                    }
                    Ok($name {
                        $($field: self.$field.take().expect("presence checked above")),+
                    })
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
                            if !matches!(token, Token::DictStart) {
                                return Err(PlanError::ExpectedDictionaryStart);
                            }
                            self.phase = [<$name PlanPhase>]::Key;
                            Ok(PlanStep::Persists)
                        }
                        [<$name PlanPhase>]::Key => {
                            if matches!(&token, Token::DictEnd) && !self.key_started {
                                return Ok(PlanStep::Done(self.finish()?));
                            }
                            self.key_started = true;
                            match self.key_plan.feed(token)? {
                                PlanStep::Persists => Ok(PlanStep::Persists),
                                PlanStep::Done(name) => {
                                    let field = match name.as_str() {
                                        $(stringify!($field) => {
                                            if self.$field.is_some() {
                                                return Err(PlanError::KeyFoundBefore(name.as_str().to_owned()));
                                            }
                                            [<$name PlanField>]::[<$field:camel>](Default::default())
                                        })+
                                        other => return Err(PlanError::UnknownKey(other.to_owned())),
                                    };
                                    self.phase = [<$name PlanPhase>]::Value(field);
                                    Ok(PlanStep::Persists)
                                }
                            }
                        }
                        [<$name PlanPhase>]::Value(field) => {
                            match field {
                                $([<$name PlanField>]::[<$field:camel>](plan) => {
                                    match plan.feed(token)? {
                                        PlanStep::Persists => Ok(PlanStep::Persists),
                                        PlanStep::Done(value) => {
                                            self.$field = Some(value);
                                            self.phase = [<$name PlanPhase>]::Key;
                                            self.key_plan = Default::default();
                                            self.key_started = false;
                                            Ok(PlanStep::Persists)
                                        }
                                    }
                                })+
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
