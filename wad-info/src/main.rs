//! `wadinfo` reads a WAD, lists its lumps or loads one of its levels, and
//! reports which subsector of the level's BSP a point falls in.

mod cli;
mod config;

use std::error::Error;

use cli::*;
use log::{LevelFilter, info};
use simplelog::TermLogger;
use wad::{IVec2, LevelData, WadData};

use crate::config::UserConfig;

const BASE_DIR: &str = "wad-info/";

fn main() -> Result<(), Box<dyn Error>> {
    let mut options: CLIOptions = argh::from_env();

    TermLogger::init(
        options.verbose.unwrap_or(LevelFilter::Warn),
        simplelog::ConfigBuilder::default()
            .set_time_level(LevelFilter::Trace)
            .build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut user_config = UserConfig::load()?;
    user_config.sync_cli(&mut options);

    if options.wad.is_empty() {
        return Err("no WAD given and none remembered, use --wad <path>".into());
    }
    let wad = WadData::open(&options.wad)?;

    if options.list {
        user_config.write()?;
        print_directory(&wad);
        return Ok(());
    }

    let map = match options.map.take() {
        Some(map) => map,
        None => wad
            .level_names()
            .first()
            .map(|name| name.to_string())
            .ok_or("WAD contains no levels")?,
    };
    let level = LevelData::load(&wad, &map)?;
    user_config.map.clone_from(&map);
    user_config.write()?;

    print_level(&level);

    let point = match (options.x, options.y) {
        (Some(x), Some(y)) => IVec2::new(x, y),
        (None, None) => level
            .player_start(1)
            .map(|thing| thing.position())
            .ok_or("level has no player 1 start, use --x and --y")?,
        _ => return Err("--x and --y must be given together".into()),
    };
    locate(&level, point)?;
    Ok(())
}

fn print_directory(wad: &WadData) {
    println!(
        "{} with {} lumps",
        wad.header().identification,
        wad.lump_count()
    );
    for (i, lump) in wad.lumps().iter().enumerate() {
        println!(
            "{:>5} {:<8} {:>10} {:>8}",
            i, lump.name, lump.lump_offset, lump.lump_size
        );
    }
}

fn print_level(level: &LevelData) {
    println!("{} (lump #{})", level.name(), level.marker_index());
    println!("  things:     {}", level.things().len());
    println!("  vertexes:   {}", level.vertexes().len());
    println!("  linedefs:   {}", level.linedefs().len());
    println!("  sidedefs:   {}", level.sidedefs().len());
    println!("  sectors:    {}", level.sectors().len());
    println!("  segs:       {}", level.segments().len());
    println!("  subsectors: {}", level.subsectors().len());
    println!("  nodes:      {}", level.nodes().len());
    if let Some(extents) = level.extents() {
        println!(
            "  extents:    ({}, {}) to ({}, {}), {} x {}",
            extents.min.x,
            extents.min.y,
            extents.max.x,
            extents.max.y,
            extents.width(),
            extents.height()
        );
    }
}

fn locate(level: &LevelData, point: IVec2) -> Result<(), Box<dyn Error>> {
    let bsp = level.bsp()?;
    let id = bsp.point_in_subsector(point)?;
    info!("({}, {}) is in subsector {}", point.x, point.y, id);

    let subsector = &bsp.subsectors()[id];
    println!(
        "({}, {}) is in subsector {}: {} segs from seg {}",
        point.x, point.y, id, subsector.seg_count, subsector.start_seg
    );
    let vertexes = level.vertexes();
    for seg in level.subsector_segments(id).unwrap_or_default() {
        let v1 = vertexes.get(seg.start_vertex as usize);
        let v2 = vertexes.get(seg.end_vertex as usize);
        match (v1, v2) {
            (Some(v1), Some(v2)) => println!(
                "  linedef {:>4}: ({}, {}) -> ({}, {})",
                seg.linedef, v1.x, v1.y, v2.x, v2.y
            ),
            _ => println!(
                "  linedef {:>4}: vertex {} -> {} (missing)",
                seg.linedef, seg.start_vertex, seg.end_vertex
            ),
        }
    }
    Ok(())
}
