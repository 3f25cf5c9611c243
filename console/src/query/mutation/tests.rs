//! Success contract ordering and failure bookkeeping of mutations.

use super::*;
use crate::domain::ports::{
    MockNavigator, MockNotifier, NavigationError, SilentNotifier, StaticNavigator,
};
use crate::domain::{QueryKey, QueryOptions};
use futures_util::FutureExt;
use mockall::Sequence;
use rstest::rstest;

async fn seed(cache: &QueryCache, endpoint: Endpoint) -> QueryKey {
    let key = QueryKey::list(endpoint, QueryOptions::default());
    cache
        .fetch(key.clone(), || async { Ok::<_, Error>(vec![1_u8]) })
        .await
        .expect("seed entry");
    key
}

fn succeeding() -> Fetcher<u8, u8> {
    Arc::new(|input| async move { Ok(input + 1) }.boxed())
}

fn failing() -> Fetcher<u8, u8> {
    Arc::new(|_| async { Err(Error::invalid_request("name is required")) }.boxed())
}

fn quiet(cache: QueryCache) -> MutationEffects {
    MutationEffects {
        cache,
        notifier: Arc::new(SilentNotifier),
        navigator: Arc::new(StaticNavigator),
    }
}

#[rstest]
#[tokio::test]
async fn success_notifies_then_navigates_then_invalidates() {
    let cache = QueryCache::new();
    let key = seed(&cache, Endpoint::Assets).await;
    let mut order = Sequence::new();

    let mut notifier = MockNotifier::new();
    notifier
        .expect_success()
        .withf(|message| message == "Created successfully")
        .times(1)
        .in_sequence(&mut order)
        .return_const(());
    let mut navigator = MockNavigator::new();
    let watched = cache.clone();
    let watched_key = key.clone();
    navigator
        .expect_push()
        .withf(move |path| {
            // Invalidation has not happened yet when navigation runs.
            path == "/assets" && !watched.snapshot::<Vec<u8>>(&watched_key).stale
        })
        .times(1)
        .in_sequence(&mut order)
        .returning(|_| Ok(()));

    let mutation = Mutation::new(
        MutationEffects {
            cache: cache.clone(),
            notifier: Arc::new(notifier),
            navigator: Arc::new(navigator),
        },
        Endpoint::Assets,
        MutationAction::Create,
        succeeding(),
    )
    .navigate_to("/assets");

    let output = mutation.trigger(1).await.expect("mutation succeeds");

    assert_eq!(output, 2);
    assert!(cache.snapshot::<Vec<u8>>(&key).stale);
    assert!(!mutation.is_pending());
    assert!(mutation.last_error().is_none());
}

#[rstest]
#[tokio::test]
async fn failure_is_returned_recorded_and_leaves_the_cache_alone() {
    let cache = QueryCache::new();
    let key = seed(&cache, Endpoint::Categories).await;
    let mut notifier = MockNotifier::new();
    notifier.expect_success().never();

    let mutation = Mutation::new(
        MutationEffects {
            cache: cache.clone(),
            notifier: Arc::new(notifier),
            navigator: Arc::new(StaticNavigator),
        },
        Endpoint::Categories,
        MutationAction::Create,
        failing(),
    );

    let err = mutation.trigger(1).await.expect_err("mutation fails");

    assert_eq!(err.message(), "name is required");
    assert_eq!(mutation.last_error(), Some(err));
    assert!(!cache.snapshot::<Vec<u8>>(&key).stale);

    mutation.reset();
    assert!(mutation.last_error().is_none());
}

#[rstest]
#[tokio::test]
async fn navigation_failures_do_not_fail_the_write() {
    let cache = QueryCache::new();
    let key = seed(&cache, Endpoint::Assets).await;
    let mut navigator = MockNavigator::new();
    navigator
        .expect_push()
        .returning(|path| Err(NavigationError::unknown_route(path)));

    let mutation = Mutation::new(
        MutationEffects {
            cache: cache.clone(),
            notifier: Arc::new(SilentNotifier),
            navigator: Arc::new(navigator),
        },
        Endpoint::Assets,
        MutationAction::Update,
        succeeding(),
    )
    .navigate_to("/nowhere");

    mutation.trigger(1).await.expect("write still succeeds");
    assert!(cache.snapshot::<Vec<u8>>(&key).stale);
}

#[rstest]
#[tokio::test]
async fn hooks_run_before_invalidation_and_extra_endpoints_are_invalidated() {
    let cache = QueryCache::new();
    let profile = seed(&cache, Endpoint::Profile).await;
    let me = seed(&cache, Endpoint::Me).await;
    let watched = cache.clone();
    let watched_key = profile.clone();
    let hook: SuccessHook = Arc::new(move || {
        let fresh = !watched.snapshot::<Vec<u8>>(&watched_key).stale;
        async move {
            assert!(fresh, "hook must run before invalidation");
            Ok(())
        }
        .boxed()
    });

    let mutation = Mutation::new(
        quiet(cache.clone()),
        Endpoint::Profile,
        MutationAction::Update,
        succeeding(),
    )
    .also_invalidates(Endpoint::Me)
    .after_success(hook);

    mutation.trigger(1).await.expect("mutation succeeds");

    assert_eq!(mutation.invalidates(), &[Endpoint::Profile, Endpoint::Me]);
    assert!(cache.snapshot::<Vec<u8>>(&profile).stale);
    assert!(cache.snapshot::<Vec<u8>>(&me).stale);
}

#[rstest]
#[tokio::test]
async fn failing_hooks_are_logged_not_returned() {
    let hook: SuccessHook = Arc::new(|| async { Err(Error::transport("me failed")) }.boxed());
    let mutation = Mutation::new(
        quiet(QueryCache::new()),
        Endpoint::Profile,
        MutationAction::Update,
        succeeding(),
    )
    .after_success(hook);

    assert_eq!(mutation.trigger(4).await.expect("write succeeded"), 5);
    assert!(mutation.last_error().is_none());
}

#[rstest]
#[case(MutationAction::Create, "Created successfully")]
#[case(MutationAction::Update, "Updated successfully")]
#[case(MutationAction::Delete, "Deleted successfully")]
#[case(MutationAction::Checkout, "Checkout successfully")]
#[case(MutationAction::Checkin, "Checkin successfully")]
fn actions_carry_their_success_message(#[case] action: MutationAction, #[case] expected: &str) {
    assert_eq!(action.success_message(), expected);
}

#[rstest]
#[tokio::test]
async fn abandoned_triggers_do_not_stay_pending() {
    let stalled: Fetcher<u8, u8> =
        Arc::new(|_| futures::future::pending::<Result<u8, Error>>().boxed());
    let mutation = Mutation::new(
        quiet(QueryCache::new()),
        Endpoint::Assets,
        MutationAction::Update,
        stalled,
    );
    let observer = mutation.clone();

    let mut in_flight = Box::pin(mutation.trigger(1));
    assert!(futures::poll!(in_flight.as_mut()).is_pending());
    assert!(observer.is_pending());
    drop(in_flight);
    assert!(!observer.is_pending());

    let timed_out = tokio::time::timeout(std::time::Duration::from_millis(10), mutation.trigger(2))
        .await;
    assert!(timed_out.is_err());
    assert!(!mutation.is_pending());
    assert!(!observer.is_pending());
    assert!(mutation.last_error().is_none());
}
