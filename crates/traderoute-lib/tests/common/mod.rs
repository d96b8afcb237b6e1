//! Common test utilities and fixture helpers.
//!
//! Integration tests build small SQLite datasets on the fly so they do not
//! depend on a checked-in database.

use std::path::Path;

use rusqlite::Connection;
use tempfile::NamedTempFile;

use traderoute_lib::{
    RegionRecord, RouteGraph, RouteType, TerrainSpeedTable, TradeRouteRecord, TravelConfig,
};

/// Schema plus the three-region scenario used across the tests:
/// 1 -(100, land, plains)- 2 -(200, sea, plains)- 3, a slow mountain pass
/// 1 -(200, land, mountains)- 3 and a standalone region 4.
#[allow(dead_code)]
pub const FIXTURE_SQL: &str = r#"
    CREATE TABLE terrain (
        terrain TEXT PRIMARY KEY,
        travel_speed REAL NOT NULL
    );
    CREATE TABLE regions (
        region_num INTEGER PRIMARY KEY,
        name TEXT,
        prosperity REAL
    );
    CREATE TABLE trade_routes (
        origin INTEGER NOT NULL,
        destination INTEGER NOT NULL,
        distance INTEGER NOT NULL,
        route_type TEXT NOT NULL,
        terrain_type TEXT NOT NULL
    );
    INSERT INTO terrain (terrain, travel_speed) VALUES
        ('plains', 1.0),
        ('mountains', 0.5);
    INSERT INTO regions (region_num, name, prosperity) VALUES
        (1, 'Aldmoor', 0.4),
        (2, 'Brightwater', 0.9),
        (3, 'Caldera', 0.1),
        (4, 'Dunhollow', 0.0);
    INSERT INTO trade_routes (origin, destination, distance, route_type, terrain_type) VALUES
        (1, 2, 100, 'land', 'plains'),
        (2, 3, 200, 'sea', 'plains'),
        (1, 3, 200, 'land', 'mountains');
"#;

/// Write `sql` into a fresh temporary SQLite database.
#[allow(dead_code)]
pub fn sqlite_dataset(sql: &str) -> NamedTempFile {
    let file = NamedTempFile::with_suffix(".db").expect("create temp db");
    write_sqlite(file.path(), sql);
    file
}

#[allow(dead_code)]
pub fn write_sqlite(path: &Path, sql: &str) {
    let conn = Connection::open(path).expect("open temp db");
    conn.execute_batch(sql).expect("apply fixture sql");
}

/// Graph with a single `plains` terrain at speed 1.0 and default base speeds.
#[allow(dead_code)]
pub fn plains_graph() -> RouteGraph {
    let mut terrain = TerrainSpeedTable::default();
    terrain.insert("plains", 1.0).expect("valid speed");
    RouteGraph::new(terrain, TravelConfig::default()).expect("valid config")
}

/// Land route over plains; with the default caravan speed the weight is
/// `distance / 20`.
#[allow(dead_code)]
pub fn land(graph: &mut RouteGraph, origin: i64, destination: i64, distance: f64) {
    graph
        .add_edge(origin, destination, distance, RouteType::Land, "plains")
        .expect("plains is a known terrain");
}

/// Record-level trade route over plains.
#[allow(dead_code)]
pub fn route(origin: i64, destination: i64, distance: f64, route_type: &str) -> TradeRouteRecord {
    TradeRouteRecord {
        origin,
        destination,
        distance,
        route_type: route_type.to_string(),
        terrain_type: "plains".to_string(),
    }
}

#[allow(dead_code)]
pub fn region(region_num: i64) -> RegionRecord {
    RegionRecord {
        region_num,
        name: None,
    }
}
