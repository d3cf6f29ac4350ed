//! Presenter behavior driven by a live engine.

use std::sync::Arc;
use std::time::Duration;

use slideway::core::types::{Direction, RoutePath};
use slideway::engine::{MachineConfig, NavigationMachine};
use slideway::host::mock::MockHost;
use slideway::present::{spawn_presenter, LayerRole, MotionMode, ViewLifecycle};

fn path(p: &str) -> RoutePath {
    RoutePath::new(p).unwrap()
}

fn machine() -> NavigationMachine {
    let host = Arc::new(MockHost::new());
    NavigationMachine::new(MachineConfig::default(), host.clone(), host)
}

#[tokio::test(start_paused = true)]
async fn outgoing_view_keeps_its_state_while_exiting() {
    let machine = machine();
    let duration = machine.timing().transition_duration();
    let mut presenter = spawn_presenter(machine.reader(), MotionMode::Animated, duration);
    presenter.wait_converged().await;

    let ticket = machine.navigate_to(path("/driftwood")).ticket().unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let mid = presenter.composition();
    let previous = mid.previous().unwrap();
    assert_eq!(previous.path, path("/"));
    assert_eq!(previous.lifecycle, ViewLifecycle::Exiting);
    // Frozen with the state it had before the route changed.
    assert_eq!(previous.state.current_path, path("/"));
    assert!(previous.state.is_navigating);
    assert_eq!(previous.slide.to_offset, -1.0);

    let current = mid.current().unwrap();
    assert_eq!(current.state.direction, Direction::Forward);
    assert_eq!(current.slide.from_offset, 1.0);

    ticket.finished().await;
    let mut compositions = presenter.compositions();
    let settled = compositions
        .wait_for(|c| c.is_converged() && !c.layers[0].state.is_navigating)
        .await
        .unwrap()
        .clone();
    assert_eq!(settled.layers.len(), 1);
    assert_eq!(settled.layers[0].role, LayerRole::Current);
    assert!(!settled.layers[0].state.is_navigating);
}

#[tokio::test(start_paused = true)]
async fn backward_navigation_slides_down() {
    let host = Arc::new(MockHost::new());
    let config = MachineConfig {
        initial_path: Some(path("/contact")),
        ..Default::default()
    };
    let machine = NavigationMachine::new(config, host.clone(), host);
    let presenter = spawn_presenter(
        machine.reader(),
        MotionMode::Animated,
        machine.timing().transition_duration(),
    );

    let ticket = machine.navigate_to(path("/tidal")).ticket().unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let mid = presenter.composition();
    assert_eq!(mid.current().unwrap().slide.from_offset, -1.0);
    assert_eq!(mid.previous().unwrap().slide.to_offset, 1.0);

    ticket.finished().await;
}

#[tokio::test(start_paused = true)]
async fn reduced_motion_swaps_in_place() {
    let machine = machine();
    let presenter = spawn_presenter(
        machine.reader(),
        MotionMode::Reduced,
        machine.timing().transition_duration(),
    );

    let ticket = machine.navigate_to(path("/about")).ticket().unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let mid = presenter.composition();
    assert!(mid.is_converged());
    assert_eq!(mid.layers[0].path, path("/about"));

    ticket.finished().await;
    drop(machine);
    assert!(presenter.join().await.is_converged());
}
