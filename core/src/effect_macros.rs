//! Shorthand for building effects inside reducers

/// Wraps an async block into [`Effect::Future`](crate::effect::Effect::Future)
///
/// The block is `async move` and must evaluate to `Option<Action>`.
///
/// ```rust,ignore
/// use hooks_lab_core::async_effect;
///
/// let loader = Arc::clone(&env.loader);
/// async_effect! {
///     let items = loader.load(resource_type).await.ok()?;
///     Some(EffectsAction::Loaded { resource_type, items })
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Builds an [`Effect::Delay`](crate::effect::Effect::Delay)
///
/// ```rust,ignore
/// use hooks_lab_core::delay;
/// use std::time::Duration;
///
/// delay! {
///     duration: Duration::from_millis(250),
///     action: EffectsAction::WindowResized(1024)
/// }
/// ```
#[macro_export]
macro_rules! delay {
    (
        duration: $duration:expr,
        action: $action:expr $(,)?
    ) => {
        $crate::effect::Effect::Delay {
            duration: $duration,
            action: ::std::boxed::Box::new($action),
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::effect::Effect;
    use std::time::Duration;

    #[derive(Clone, Debug, PartialEq)]
    enum Ping {
        Pong(u8),
        Timeout,
    }

    #[test]
    fn async_effect_runs_its_block() {
        let base = 6;
        let effect = async_effect! {
            tokio::task::yield_now().await;
            Some(Ping::Pong(base + 1))
        };
        let Effect::Future(fut) = effect else {
            unreachable!("async_effect! always builds a future");
        };

        assert_eq!(tokio_test::block_on(fut), Some(Ping::Pong(7)));
    }

    #[test]
    fn async_effect_may_produce_nothing() {
        let effect: Effect<Ping> = async_effect! { None };
        let Effect::Future(fut) = effect else {
            unreachable!("async_effect! always builds a future");
        };

        assert_eq!(tokio_test::block_on(fut), None);
    }

    #[test]
    fn delay_keeps_duration_and_action() {
        let effect = delay! {
            duration: Duration::from_secs(3),
            action: Ping::Timeout,
        };

        let Effect::Delay { duration, action } = effect else {
            unreachable!("delay! always builds a delay");
        };
        assert_eq!(duration, Duration::from_secs(3));
        assert_eq!(*action, Ping::Timeout);
    }
}
