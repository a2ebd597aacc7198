use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use tilepath_core::collision::{by_name, CollisionStrategy};
use tilepath_core::{
    CollisionMap, Direction, DumbPathFinder, PathFinder, PathFinderConfig, PathRequest, Route, StepValidator, ZoneFlags,
};

use crate::args::{RouteArgs, StepArgs};

#[derive(Debug, Serialize)]
pub struct StepReport {
    pub x: i32,
    pub y: i32,
    pub plane: i32,
    pub size: i32,
    pub direction: &'static str,
    pub can_travel: bool,
}

pub fn load_map(path: &Path) -> Result<ZoneFlags> {
    let map = CollisionMap::open(path).with_context(|| format!("failed to load collision map {}", path.display()))?;
    info!(tiles = map.tiles.len(), blocks = map.blocks.len(), default_flag = map.default_flag, "loaded collision map");
    Ok(map.to_zone_flags())
}

fn collision(name: &str) -> Result<&'static dyn CollisionStrategy> {
    by_name(name).with_context(|| format!("unknown collision strategy '{name}'"))
}

pub fn route(args: &RouteArgs) -> Result<Route> {
    let flags = load_map(&args.map)?;
    route_on(&flags, args)
}

pub fn route_on(flags: &ZoneFlags, args: &RouteArgs) -> Result<Route> {
    let mut config = PathFinderConfig::from_env();
    if let Some(size) = args.search_map_size {
        config.search_map_size = size;
    }
    let mut finder = PathFinder::new(config.clone()).context("invalid path finder configuration")?;
    let max_size = (config.search_map_size / 2) as i32;
    ensure!((1..=max_size).contains(&args.size), "footprint must be within 1..={max_size}, got {}", args.size);

    let (src_x, src_y, plane) = args.from;
    let (dest_x, dest_y) = args.to;
    let (dest_width, dest_height) = args.dest_size;
    let req = PathRequest {
        src_size: args.size,
        dest_width,
        dest_height,
        dest_rotation: args.rotation,
        dest_shape: args.shape,
        access_bit_mask: args.access_mask,
        max_turns: args.max_turns,
        extra_block_flags: args.extra_flags,
        collision: collision(&args.collision)?,
        move_near: !args.no_move_near,
        route_blockers: args.route_blockers,
        ..PathRequest::new(src_x, src_y, dest_x, dest_y, plane)
    };
    let route = if args.greedy {
        DumbPathFinder::new().find_path(flags, &req)
    } else {
        finder.find_path(flags, &req)
    };
    info!(greedy = args.greedy, success = route.success, alternative = route.alternative, turns = route.len(), "route query finished");
    Ok(route)
}

pub fn step(args: &StepArgs) -> Result<StepReport> {
    let flags = load_map(&args.map)?;
    step_on(&flags, args)
}

pub fn step_on(flags: &ZoneFlags, args: &StepArgs) -> Result<StepReport> {
    let (dx, dy) = args.delta;
    let dir = Direction::from_delta(dx, dy).with_context(|| format!("invalid step delta ({dx}, {dy})"))?;
    ensure!(args.size >= 1, "footprint must be at least 1, got {}", args.size);
    let (x, y, plane) = args.at;
    let validator = StepValidator::new(flags).with_route_blockers(args.route_blockers);
    let can_travel = validator.can_step(x, y, plane, args.size, dir, args.extra_flags, collision(&args.collision)?);
    debug!(x, y, plane, direction = dir.name(), can_travel, "step checked");
    Ok(StepReport { x, y, plane, size: args.size, direction: dir.name(), can_travel })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{Cli, Command};
    use clap::Parser;
    use tilepath_core::flags::OBJECT;
    use tilepath_core::Waypoint;

    fn route_args(extra: &[&str]) -> RouteArgs {
        let mut argv = vec!["tilepath", "route", "--map", "unused.json"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Route(args) => args,
            Command::Step(_) => unreachable!(),
        }
    }

    fn step_args(extra: &[&str]) -> StepArgs {
        let mut argv = vec!["tilepath", "step", "--map", "unused.json"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Step(args) => args,
            Command::Route(_) => unreachable!(),
        }
    }

    #[test]
    fn routes_over_loaded_flags() {
        let flags = ZoneFlags::new();
        let route = route_on(&flags, &route_args(&["--from", "0,0,0", "--to", "3,0"])).unwrap();
        assert!(route.success);
        assert_eq!(route.waypoints, vec![Waypoint::new(3, 0)]);
    }

    #[test]
    fn honours_move_near_switch() {
        let mut flags = ZoneFlags::new();
        flags.add(3, 0, 0, OBJECT);
        let near = route_on(&flags, &route_args(&["--from", "0,0,0", "--to", "3,0"])).unwrap();
        assert!(near.success && near.alternative);
        let strict = route_on(&flags, &route_args(&["--from", "0,0,0", "--to", "3,0", "--no-move-near"])).unwrap();
        assert_eq!(strict, Route::failed());
    }

    #[test]
    fn greedy_walk_stops_at_the_first_obstacle() {
        let mut flags = ZoneFlags::new();
        flags.add(2, 0, 0, OBJECT);
        let route = route_on(&flags, &route_args(&["--from", "0,0,0", "--to", "3,0", "--greedy"])).unwrap();
        assert!(!route.success);
        assert_eq!(route.waypoints, vec![Waypoint::new(1, 0)]);
        let searched = route_on(&flags, &route_args(&["--from", "0,0,0", "--to", "3,0"])).unwrap();
        assert!(searched.reached_goal());
    }

    #[test]
    fn rejects_unknown_collision_and_oversized_footprint() {
        let flags = ZoneFlags::new();
        let err = route_on(&flags, &route_args(&["--from", "0,0,0", "--to", "3,0", "--collision", "teleport"])).unwrap_err();
        assert!(err.to_string().contains("teleport"));
        let err = route_on(&flags, &route_args(&["--from", "0,0,0", "--to", "3,0", "--size", "100"])).unwrap_err();
        assert!(err.to_string().contains("footprint"));
    }

    #[test]
    fn step_reports_direction_and_result() {
        let mut flags = ZoneFlags::new();
        flags.add(6, 5, 0, OBJECT);
        let report = step_on(&flags, &step_args(&["--at", "5,5,0", "--delta", "1,0"])).unwrap();
        assert_eq!(report.direction, "east");
        assert!(!report.can_travel);
        let report = step_on(&flags, &step_args(&["--at", "5,5,0", "--delta", "0,1"])).unwrap();
        assert!(report.can_travel);
        assert!(step_on(&flags, &step_args(&["--at", "5,5,0", "--delta", "2,0"])).is_err());
    }
}
