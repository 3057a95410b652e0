use argh::FromArgs;

/// Inspect a WAD: list its directory, or load a level and find which
/// subsector a point is in
#[derive(Debug, Clone, FromArgs)]
pub struct CLIOptions {
    /// verbose level: off, error, warn, info, debug
    #[argh(option)]
    pub verbose: Option<log::LevelFilter>,
    /// path to the WAD to read. Remembered for the next run
    #[argh(option, default = "Default::default()")]
    pub wad: String,
    /// level to load, e.g. E1M1 or MAP01. Defaults to the first level
    #[argh(option)]
    pub map: Option<String>,
    /// x coordinate of the point to locate
    #[argh(option)]
    pub x: Option<i32>,
    /// y coordinate of the point to locate
    #[argh(option)]
    pub y: Option<i32>,
    /// print the lump directory and exit
    #[argh(switch)]
    pub list: bool,
}
