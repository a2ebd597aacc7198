use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tilepath_core::options::DEFAULT_MAX_TURNS;

#[derive(Parser, Debug)]
#[command(name = "tilepath", version, about = "Footprint-aware route queries over a JSON collision map")]
pub struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search for a route and print it as JSON
    Route(RouteArgs),
    /// Check whether a single step is possible
    Step(StepArgs),
}

#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Collision map file
    #[arg(long, value_name = "PATH")]
    pub map: PathBuf,

    /// Source tile (south-west corner of the actor)
    #[arg(long, value_name = "X,Y,PLANE", value_parser = parse_tile, allow_hyphen_values = true)]
    pub from: (i32, i32, i32),

    /// Destination tile
    #[arg(long, value_name = "X,Y", value_parser = parse_point, allow_hyphen_values = true)]
    pub to: (i32, i32),

    /// Actor footprint
    #[arg(long, default_value_t = 1)]
    pub size: i32,

    /// Destination dimensions before rotation
    #[arg(long, value_name = "WxH", default_value = "1x1", value_parser = parse_dimensions)]
    pub dest_size: (i32, i32),

    /// Destination shape code (-1 tile, -2 beside-only rectangle, 0-9 walls, 10/11/22 objects)
    #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
    pub shape: i32,

    #[arg(long, default_value_t = 0)]
    pub rotation: i32,

    /// Sides of the destination that cannot be approached (N=1, E=2, S=4, W=8)
    #[arg(long, default_value_t = 0)]
    pub access_mask: u32,

    #[arg(long, default_value_t = DEFAULT_MAX_TURNS)]
    pub max_turns: usize,

    /// Flags OR-ed into every block mask
    #[arg(long, default_value_t = 0)]
    pub extra_flags: u32,

    #[arg(long, default_value = "normal")]
    pub collision: String,

    #[arg(long)]
    pub route_blockers: bool,

    /// Fail instead of walking to the closest reachable tile
    #[arg(long)]
    pub no_move_near: bool,

    /// Walk straight at the goal and stop at the first obstacle
    #[arg(long)]
    pub greedy: bool,

    /// Override the search window (also read from TILEPATH_SEARCH_MAP_SIZE)
    #[arg(long, value_name = "N")]
    pub search_map_size: Option<usize>,
}

#[derive(Args, Debug)]
pub struct StepArgs {
    #[arg(long, value_name = "PATH")]
    pub map: PathBuf,

    #[arg(long, value_name = "X,Y,PLANE", value_parser = parse_tile, allow_hyphen_values = true)]
    pub at: (i32, i32, i32),

    /// Unit step, each component in -1..=1
    #[arg(long, value_name = "DX,DY", value_parser = parse_point, allow_hyphen_values = true)]
    pub delta: (i32, i32),

    #[arg(long, default_value_t = 1)]
    pub size: i32,

    #[arg(long, default_value_t = 0)]
    pub extra_flags: u32,

    #[arg(long, default_value = "normal")]
    pub collision: String,

    #[arg(long)]
    pub route_blockers: bool,
}

fn split_ints(s: &str, sep: char, expected: usize) -> Result<Vec<i32>, String> {
    let parts = s
        .split(sep)
        .map(|p| p.trim().parse::<i32>().map_err(|e| format!("'{p}': {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    if parts.len() != expected {
        return Err(format!("expected {expected} values separated by '{sep}', got '{s}'"));
    }
    Ok(parts)
}

pub fn parse_tile(s: &str) -> Result<(i32, i32, i32), String> {
    let v = split_ints(s, ',', 3)?;
    Ok((v[0], v[1], v[2]))
}

pub fn parse_point(s: &str) -> Result<(i32, i32), String> {
    let v = split_ints(s, ',', 2)?;
    Ok((v[0], v[1]))
}

pub fn parse_dimensions(s: &str) -> Result<(i32, i32), String> {
    let v = split_ints(&s.to_ascii_lowercase(), 'x', 2)?;
    if v[0] < 1 || v[1] < 1 {
        return Err(format!("dimensions must be at least 1x1, got '{s}'"));
    }
    Ok((v[0], v[1]))
}
