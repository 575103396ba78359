//! BDD step definitions for the scheduler feature

use std::sync::Arc;

use cucumber::{then, when};

use dispatcher::publisher::{ChangeEvent, ChangePublisher};
use dispatcher::scheduler::Dispatcher;
use dispatcher::store::NotificationStore;
use dispatcher::tracker::new_history_handle;

use crate::world::DispatcherWorld;

async fn tick(world: &mut DispatcherWorld, previously_failed: bool) {
    let history = new_history_handle();
    {
        let mut book = history.write().await;
        for (target_id, at) in &world.history {
            book.record(
                ChangeEvent {
                    service_id: world.check_id,
                    notification_id: *target_id,
                },
                *at,
            );
        }
    }

    let (publisher, mut rx) = ChangePublisher::channel(64);
    let store: Arc<dyn NotificationStore> = Arc::new(std::mem::take(&mut world.store));
    let dispatcher = Dispatcher::new(store, world.senders(), publisher, Arc::clone(&history));

    world.reported_failed = Some(dispatcher.tick(world.check_id, previously_failed).await);

    while let Ok(event) = rx.try_recv() {
        world.events.push(event);
    }
    world.history_after = Some(history.read().await.snapshot(world.check_id));
}

#[when("the scheduler ticks after a healthy tick")]
async fn tick_after_healthy(world: &mut DispatcherWorld) {
    tick(world, false).await;
}

#[when("the scheduler ticks after a failing tick")]
async fn tick_after_failing(world: &mut DispatcherWorld) {
    tick(world, true).await;
}

#[then("the tick reports the check as failing")]
fn reports_failing(world: &mut DispatcherWorld) {
    assert_eq!(world.reported_failed, Some(true));
}

#[then("the tick reports the check as healthy")]
fn reports_healthy(world: &mut DispatcherWorld) {
    assert_eq!(world.reported_failed, Some(false));
}

#[then("the tracked history of the check is empty")]
fn history_empty(world: &mut DispatcherWorld) {
    let history = world.history_after.as_ref().expect("no tick ran");
    assert!(history.is_empty(), "history: {:?}", history);
}
