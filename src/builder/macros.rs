//! Macros for ergonomic action definitions.

/// Generate an enum and its `Action` implementation.
///
/// Each variant names the kind string it dispatches under. Variants may
/// carry tuple payloads.
///
/// # Example
///
/// ```
/// use refold::action_enum;
/// use refold::core::Action;
///
/// action_enum! {
///     pub enum CounterAction {
///         Increment => "increment",
///         Decrement => "decrement",
///         Add(i64) => "add",
///     }
/// }
///
/// assert_eq!(CounterAction::Add(3).kind(), "add");
/// ```
#[macro_export]
macro_rules! action_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(( $($field:ty),* $(,)? ))? => $kind:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant $(( $($field),* ))?
            ),*
        }

        impl $crate::core::Action for $name {
            fn kind(&self) -> &str {
                match self {
                    $(Self::$variant { .. } => $kind),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::Action;
    use crate::engine::{Engine, Reducer};

    action_enum! {
        enum TestAction {
            Increment => "increment",
            Decrement => "decrement",
            Add(i64) => "add",
            Rename(String, bool) => "rename",
        }
    }

    #[test]
    fn action_enum_macro_generates_trait() {
        assert_eq!(TestAction::Increment.kind(), "increment");
        assert_eq!(TestAction::Decrement.kind(), "decrement");
        assert_eq!(TestAction::Add(1).kind(), "add");
        assert_eq!(TestAction::Rename("x".to_string(), true).kind(), "rename");
    }

    #[test]
    fn action_enum_supports_visibility() {
        action_enum! {
            pub enum PublicAction {
                Ping => "ping",
            }
        }

        assert_eq!(PublicAction::Ping.kind(), "ping");
    }

    #[test]
    fn generated_actions_drive_an_engine() {
        let reducer = Reducer::new()
            .on("increment", |c: &i64, _: &TestAction| c + 1)
            .on("add", |c: &i64, a: &TestAction| match a {
                TestAction::Add(n) => c + n,
                _ => *c,
            });
        let mut engine = Engine::initialize(reducer, 0);

        engine.dispatch(&TestAction::Increment).unwrap();
        engine.dispatch(&TestAction::Add(10)).unwrap();
        assert!(engine.dispatch(&TestAction::Decrement).is_err());

        assert_eq!(engine.current_state(), Ok(&11));
    }
}
