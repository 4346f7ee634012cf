//! Unit tests for dg-droid.

use dg_core::{Coordinate, DroidId};
use dg_spatial::{Route, SpatialGrid};

use crate::Droid;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn c(x: i32, y: i32) -> Coordinate {
    Coordinate::new(x, y)
}

fn route(cells: &[(i32, i32)]) -> Route {
    Route::new(cells.iter().map(|&(x, y)| c(x, y)).collect())
}

/// 10×10 grid with one droid standing (and claimed) at (5, 5).
fn placed() -> (SpatialGrid, Droid) {
    let mut grid = SpatialGrid::new(10, 10).unwrap();
    assert!(grid.claim(c(5, 5)));
    (grid, Droid::new(DroidId::from("TEST-1"), c(5, 5)))
}

/// Drive `droid` into `Error` with a malformed step.
fn fault(droid: &mut Droid, grid: &mut SpatialGrid) {
    let _ = droid.move_one_step(None, grid);
}

// ── Single steps ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod steps {
    use super::*;
    use crate::{MoveError, MovementState};

    #[test]
    fn initial_state() {
        let (_, droid) = placed();
        assert_eq!(droid.id().as_str(), "TEST-1");
        assert_eq!(droid.position(), c(5, 5));
        assert_eq!(droid.state(), MovementState::Idle);
        assert!(!droid.has_pending_route());
        assert!(droid.pending_steps().is_empty());
    }

    #[test]
    fn adjacent_step_moves_claim() {
        let (mut grid, mut droid) = placed();
        droid.move_one_step(Some(c(5, 6)), &mut grid).unwrap();
        assert_eq!(droid.position(), c(5, 6));
        assert_eq!(droid.state(), MovementState::Idle);
        assert!(grid.is_occupied(c(5, 6)));
        assert!(!grid.is_occupied(c(5, 5)));
    }

    #[test]
    fn non_adjacent_step_faults() {
        let (mut grid, mut droid) = placed();
        let err = droid.move_one_step(Some(c(7, 7)), &mut grid).unwrap_err();
        assert_eq!(err, MoveError::InvalidTarget { from: c(5, 5), to: Some(c(7, 7)) });
        assert_eq!(droid.state(), MovementState::Error);
        assert_eq!(droid.position(), c(5, 5));
        assert_eq!(grid.occupied(), vec![c(5, 5)]);
    }

    #[test]
    fn diagonal_and_same_cell_are_not_steps() {
        let (mut grid, mut droid) = placed();
        assert!(droid.move_one_step(Some(c(6, 6)), &mut grid).is_err());
        droid.reset();
        assert!(droid.move_one_step(Some(c(5, 5)), &mut grid).is_err());
        assert_eq!(droid.state(), MovementState::Error);
    }

    #[test]
    fn absent_target_faults() {
        let (mut grid, mut droid) = placed();
        let err = droid.move_one_step(None, &mut grid).unwrap_err();
        assert_eq!(err, MoveError::InvalidTarget { from: c(5, 5), to: None });
        assert!(err.is_fault());
        assert_eq!(droid.state(), MovementState::Error);
        assert_eq!(grid.occupied(), vec![c(5, 5)]);
    }

    #[test]
    fn move_outside_grid_faults_and_stays_put() {
        let mut grid = SpatialGrid::new(10, 10).unwrap();
        grid.claim(c(9, 9));
        let mut droid = Droid::new(DroidId::from("EDGE-1"), c(9, 9));

        let err = droid.move_to(c(10, 10), &mut grid).unwrap_err();
        assert!(matches!(err, MoveError::InvalidTarget { .. }));
        assert_eq!(droid.position(), c(9, 9));
        assert!(grid.is_occupied(c(9, 9)));

        droid.reset();
        assert!(droid.move_one_step(Some(c(10, 9)), &mut grid).is_err());
        assert_eq!(droid.position(), c(9, 9));
        assert_eq!(grid.occupied(), vec![c(9, 9)]);
    }

    #[test]
    fn step_into_obstacle_blocks_and_rolls_back() {
        let (mut grid, mut droid) = placed();
        grid.add_obstacle(c(5, 6)).unwrap();

        let err = droid.move_one_step(Some(c(5, 6)), &mut grid).unwrap_err();
        assert_eq!(err, MoveError::Blocked { at: c(5, 5), target: c(5, 6) });
        assert!(!err.is_fault());
        assert_eq!(droid.state(), MovementState::Blocked);
        assert_eq!(droid.position(), c(5, 5));
        assert!(grid.is_occupied(c(5, 5)), "original cell re-claimed");
        assert!(!grid.is_occupied(c(5, 6)));
    }

    #[test]
    fn blocked_rollback_does_not_claim_unheld_start() {
        // Caller never claimed the start cell.
        let mut grid = SpatialGrid::new(4, 4).unwrap();
        grid.add_obstacle(c(1, 0)).unwrap();
        let mut droid = Droid::new(DroidId::from("LOOSE-1"), c(0, 0));

        assert!(droid.move_one_step(Some(c(1, 0)), &mut grid).is_err());
        assert_eq!(droid.state(), MovementState::Blocked);
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn blocked_is_retryable() {
        let (mut grid, mut droid) = placed();
        grid.add_obstacle(c(4, 5)).unwrap();
        assert!(droid.move_one_step(Some(c(4, 5)), &mut grid).is_err());
        assert_eq!(droid.state(), MovementState::Blocked);

        grid.remove_obstacle(c(4, 5));
        droid.move_one_step(Some(c(4, 5)), &mut grid).unwrap();
        assert_eq!(droid.state(), MovementState::Idle);
        assert_eq!(droid.position(), c(4, 5));
    }

    #[test]
    fn display_names_id_position_state() {
        let (_, droid) = placed();
        assert_eq!(droid.to_string(), "Droid{id=TEST-1, position=(5, 5), state=idle}");
    }
}

// ── Contention ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod contention {
    use super::*;
    use crate::{MoveError, MovementState};

    #[test]
    fn move_into_other_droid_blocks_without_changing_occupancy() {
        let mut grid = SpatialGrid::new(10, 10).unwrap();
        grid.claim(c(2, 2));
        grid.claim(c(3, 2));
        let mut mover = Droid::new(DroidId::from("A-1"), c(2, 2));
        let sitter = Droid::new(DroidId::from("B-1"), c(3, 2));
        let before = grid.occupied();

        let err = mover.move_to(c(3, 2), &mut grid).unwrap_err();
        assert_eq!(err, MoveError::Blocked { at: c(2, 2), target: c(3, 2) });
        assert_eq!(mover.state(), MovementState::Blocked);
        assert_eq!(mover.position(), c(2, 2));
        assert_eq!(sitter.position(), c(3, 2));
        assert_eq!(grid.occupied(), before);
    }

    #[test]
    fn swap_attempt_blocks_both() {
        let mut grid = SpatialGrid::new(4, 1).unwrap();
        grid.claim(c(0, 0));
        grid.claim(c(1, 0));
        let mut a = Droid::new(DroidId::from("A-1"), c(0, 0));
        let mut b = Droid::new(DroidId::from("B-1"), c(1, 0));

        assert!(a.move_one_step(Some(c(1, 0)), &mut grid).is_err());
        assert!(b.move_one_step(Some(c(0, 0)), &mut grid).is_err());
        assert_eq!(a.state(), MovementState::Blocked);
        assert_eq!(b.state(), MovementState::Blocked);
        assert_eq!(grid.occupied(), vec![c(0, 0), c(1, 0)]);
    }

    #[test]
    fn vacated_cell_becomes_available() {
        let mut grid = SpatialGrid::new(4, 1).unwrap();
        grid.claim(c(0, 0));
        grid.claim(c(1, 0));
        let mut a = Droid::new(DroidId::from("A-1"), c(0, 0));
        let mut b = Droid::new(DroidId::from("B-1"), c(1, 0));

        assert!(a.move_one_step(Some(c(1, 0)), &mut grid).is_err());
        b.move_one_step(Some(c(2, 0)), &mut grid).unwrap();
        a.move_one_step(Some(c(1, 0)), &mut grid).unwrap();
        assert_eq!(grid.occupied(), vec![c(1, 0), c(2, 0)]);
    }
}

// ── Routes ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod routes {
    use super::*;
    use crate::{Advance, MoveError, MovementState};

    #[test]
    fn follows_valid_route() {
        let (mut grid, mut droid) = placed();
        droid.follow_path(Some(route(&[(5, 6), (5, 7), (6, 7)])), &mut grid).unwrap();
        assert_eq!(droid.position(), c(6, 7));
        assert_eq!(droid.state(), MovementState::Idle);
        assert!(!droid.has_pending_route());
        assert_eq!(grid.occupied(), vec![c(6, 7)]);
    }

    #[test]
    fn empty_route_is_a_no_op() {
        let (mut grid, mut droid) = placed();
        droid.follow_path(Some(Route::empty()), &mut grid).unwrap();
        assert_eq!(droid.position(), c(5, 5));
        assert_eq!(droid.state(), MovementState::Idle);
        assert_eq!(grid.occupied(), vec![c(5, 5)]);
    }

    #[test]
    fn absent_route_faults_without_touching_grid() {
        let (mut grid, mut droid) = placed();
        let err = droid.follow_path(None, &mut grid).unwrap_err();
        assert_eq!(err, MoveError::InvalidRoute);
        assert_eq!(droid.state(), MovementState::Error);
        assert_eq!(droid.position(), c(5, 5));
        assert_eq!(grid.occupied(), vec![c(5, 5)]);
    }

    #[test]
    fn blocked_route_stops_and_keeps_remaining_steps() {
        let (mut grid, mut droid) = placed();
        grid.add_obstacle(c(5, 7)).unwrap();

        let err = droid
            .follow_path(Some(route(&[(5, 6), (5, 7), (5, 8)])), &mut grid)
            .unwrap_err();
        assert_eq!(err, MoveError::Blocked { at: c(5, 6), target: c(5, 7) });
        assert_eq!(droid.state(), MovementState::Blocked);
        assert_eq!(droid.position(), c(5, 6));
        assert_eq!(droid.pending_steps(), &[c(5, 7), c(5, 8)]);
        assert_eq!(grid.occupied(), vec![c(5, 6)]);
    }

    #[test]
    fn blocked_on_first_step_stays_home() {
        let (mut grid, mut droid) = placed();
        grid.add_obstacle(c(5, 6)).unwrap();
        assert!(droid.follow_path(Some(route(&[(5, 6), (5, 7)])), &mut grid).is_err());
        assert_eq!(droid.state(), MovementState::Blocked);
        assert_eq!(droid.position(), c(5, 5));
        assert!(grid.is_occupied(c(5, 5)));
    }

    #[test]
    fn resume_finishes_after_obstacle_cleared() {
        let (mut grid, mut droid) = placed();
        grid.add_obstacle(c(5, 7)).unwrap();
        assert!(droid.follow_path(Some(route(&[(5, 6), (5, 7), (5, 8)])), &mut grid).is_err());

        grid.remove_obstacle(c(5, 7));
        droid.resume(&mut grid).unwrap();
        assert_eq!(droid.position(), c(5, 8));
        assert_eq!(droid.state(), MovementState::Idle);
        assert!(!droid.has_pending_route());
    }

    #[test]
    fn resume_without_route_is_a_no_op() {
        let (mut grid, mut droid) = placed();
        droid.resume(&mut grid).unwrap();
        assert_eq!(droid.position(), c(5, 5));
        assert_eq!(droid.state(), MovementState::Idle);
    }

    #[test]
    fn non_contiguous_route_faults_mid_walk() {
        let (mut grid, mut droid) = placed();
        let err = droid
            .follow_path(Some(route(&[(5, 6), (7, 6)])), &mut grid)
            .unwrap_err();
        assert_eq!(err, MoveError::InvalidTarget { from: c(5, 6), to: Some(c(7, 6)) });
        assert_eq!(droid.state(), MovementState::Error);
        assert_eq!(droid.position(), c(5, 6));
        assert!(droid.has_pending_route());

        droid.reset();
        assert_eq!(droid.state(), MovementState::Idle);
        assert!(!droid.has_pending_route());
    }

    #[test]
    fn advance_walks_one_step_per_call() {
        let (mut grid, mut droid) = placed();
        droid.assign(route(&[(6, 5), (7, 5)])).unwrap();
        assert_eq!(droid.state(), MovementState::Moving);
        assert_eq!(droid.position(), c(5, 5), "assign does not move");

        assert_eq!(droid.advance(&mut grid).unwrap(), Advance::Stepped(c(6, 5)));
        assert_eq!(droid.state(), MovementState::Moving);
        assert_eq!(droid.pending_steps(), &[c(7, 5)]);

        assert_eq!(droid.advance(&mut grid).unwrap(), Advance::Arrived(c(7, 5)));
        assert_eq!(droid.state(), MovementState::Idle);
        assert_eq!(droid.advance(&mut grid).unwrap(), Advance::Idle);
    }

    #[test]
    fn advance_retries_blocked_step() {
        let (mut grid, mut droid) = placed();
        grid.claim(c(6, 5));
        droid.assign(route(&[(6, 5)])).unwrap();

        assert!(matches!(droid.advance(&mut grid), Err(MoveError::Blocked { .. })));
        assert_eq!(droid.pending_steps(), &[c(6, 5)]);

        grid.release(c(6, 5));
        assert_eq!(droid.advance(&mut grid).unwrap(), Advance::Arrived(c(6, 5)));
    }

    #[test]
    fn direct_move_abandons_blocked_route() {
        let (mut grid, mut droid) = placed();
        grid.add_obstacle(c(5, 7)).unwrap();
        assert!(droid.follow_path(Some(route(&[(5, 6), (5, 7)])), &mut grid).is_err());
        assert_eq!(droid.state(), MovementState::Blocked);
        assert!(droid.has_pending_route());

        droid.move_to(c(0, 0), &mut grid).unwrap();
        assert_eq!(droid.state(), MovementState::Idle);
        assert!(!droid.has_pending_route());
        assert!(droid.pending_steps().is_empty());

        assert_eq!(droid.advance(&mut grid).unwrap(), Advance::Idle);
        assert_eq!(droid.state(), MovementState::Idle);
        assert_eq!(droid.position(), c(0, 0));
    }

    #[test]
    fn single_step_abandons_route_in_flight() {
        let (mut grid, mut droid) = placed();
        droid.assign(route(&[(6, 5), (7, 5)])).unwrap();
        droid.move_one_step(Some(c(5, 4)), &mut grid).unwrap();
        assert!(!droid.has_pending_route());
        assert_eq!(droid.advance(&mut grid).unwrap(), Advance::Idle);
        assert_eq!(droid.position(), c(5, 4));
    }

    #[test]
    fn resume_after_blocked_direct_move_settles_idle() {
        let (mut grid, mut droid) = placed();
        grid.add_obstacle(c(8, 8)).unwrap();
        assert!(droid.move_to(c(8, 8), &mut grid).is_err());
        assert_eq!(droid.state(), MovementState::Blocked);

        droid.resume(&mut grid).unwrap();
        assert_eq!(droid.state(), MovementState::Idle);
        assert_eq!(droid.position(), c(5, 5));
        assert!(grid.is_occupied(c(5, 5)));
    }

    #[test]
    fn assigning_empty_route_idles() {
        let (_, mut droid) = placed();
        droid.assign(route(&[(5, 6)])).unwrap();
        droid.assign(Route::empty()).unwrap();
        assert_eq!(droid.state(), MovementState::Idle);
        assert!(!droid.has_pending_route());
    }
}

// ── Error state & reset ───────────────────────────────────────────────────────

#[cfg(test)]
mod error_state {
    use super::*;
    use crate::{MoveError, MovementState};

    #[test]
    fn commands_refused_while_faulted() {
        let (mut grid, mut droid) = placed();
        fault(&mut droid, &mut grid);
        let before = grid.occupied();

        let faulted = MoveError::Faulted(DroidId::from("TEST-1"));
        assert_eq!(droid.move_to(c(5, 6), &mut grid), Err(faulted.clone()));
        assert_eq!(droid.move_one_step(Some(c(5, 6)), &mut grid), Err(faulted.clone()));
        assert_eq!(droid.follow_path(Some(route(&[(5, 6)])), &mut grid), Err(faulted.clone()));
        assert_eq!(droid.follow_path(Some(Route::empty()), &mut grid), Err(faulted.clone()));
        assert_eq!(droid.assign(route(&[(5, 6)])), Err(faulted.clone()));
        assert_eq!(droid.advance(&mut grid), Err(faulted.clone()));
        assert_eq!(droid.resume(&mut grid), Err(faulted));

        assert_eq!(droid.state(), MovementState::Error);
        assert_eq!(droid.position(), c(5, 5));
        assert_eq!(grid.occupied(), before);
    }

    #[test]
    fn reset_clears_error() {
        let (mut grid, mut droid) = placed();
        fault(&mut droid, &mut grid);
        assert_eq!(droid.state(), MovementState::Error);
        droid.reset();
        assert_eq!(droid.state(), MovementState::Idle);
        droid.move_one_step(Some(c(5, 6)), &mut grid).unwrap();
    }

    #[test]
    fn reset_is_no_op_elsewhere() {
        let (mut grid, mut droid) = placed();

        droid.reset();
        assert_eq!(droid.state(), MovementState::Idle);

        droid.assign(route(&[(5, 6)])).unwrap();
        droid.reset();
        assert_eq!(droid.state(), MovementState::Moving);
        assert!(droid.has_pending_route());

        grid.add_obstacle(c(5, 6)).unwrap();
        assert!(droid.advance(&mut grid).is_err());
        assert_eq!(droid.state(), MovementState::Blocked);
        droid.reset();
        assert_eq!(droid.state(), MovementState::Blocked);
        assert!(droid.has_pending_route());
    }
}

// ── Factory ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod factory {
    use super::*;
    use crate::{DroidFactory, MovementState};

    #[test]
    fn kinds_get_prefixed_sequential_ids() {
        let mut f = DroidFactory::new();
        let w = f.worker(c(0, 0));
        let s = f.scout(c(1, 1));
        let b = f.builder(c(2, 2));
        assert_eq!(w.id().as_str(), "WORKER-1");
        assert_eq!(s.id().as_str(), "SCOUT-2");
        assert_eq!(b.id().as_str(), "BUILDER-3");
        assert_eq!(f.created_count(), 3);
    }

    #[test]
    fn created_droids_start_idle_at_start() {
        let mut f = DroidFactory::new();
        let d = f.create("worker", c(4, 2)).unwrap();
        assert_eq!(d.position(), c(4, 2));
        assert_eq!(d.state(), MovementState::Idle);
    }

    #[test]
    fn unknown_kind_creates_nothing() {
        let mut f = DroidFactory::new();
        assert!(f.create("UNKNOWN", c(0, 0)).is_none());
        assert!(f.create("", c(0, 0)).is_none());
        assert_eq!(f.created_count(), 0);
        assert_eq!(f.create("Scout", c(0, 0)).unwrap().id().as_str(), "SCOUT-1");
    }

    #[test]
    fn ids_are_unique() {
        let mut f = DroidFactory::new();
        let a = f.worker(c(0, 0));
        let b = f.worker(c(0, 0));
        assert_ne!(a.id(), b.id());
    }
}
