//! Output formatting for route summaries and dataset listings.
//!
//! Text and rich output delegate to the library's renderer; the enhanced
//! format adds colored START/LEG/GOAL tags; JSON serialises the summary as is.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use traderoute_lib::{RegionId, RouteRenderMode, RouteStep, RouteSummary};

use crate::terminal::{format_travel_time, ColorPalette};

/// Output formats accepted by the `--format` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text, one region per line.
    #[default]
    Text,
    /// Markdown-flavoured text.
    Rich,
    /// Colored, tagged route view.
    Enhanced,
    /// Machine-readable JSON.
    Json,
}

/// Write a route summary to `out` in the requested format.
pub fn render_route<W: Write>(
    out: &mut W,
    summary: &RouteSummary,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => write!(out, "{}", summary.render(RouteRenderMode::PlainText)),
        OutputFormat::Rich => write!(out, "{}", summary.render(RouteRenderMode::RichText)),
        OutputFormat::Enhanced => EnhancedRenderer::new(ColorPalette::detect()).render(out, summary),
        OutputFormat::Json => write_json(out, summary),
    }
}

/// Serialise `value` as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

/// Renderer for the enhanced format.
pub struct EnhancedRenderer {
    palette: ColorPalette,
}

impl EnhancedRenderer {
    #[must_use]
    pub const fn new(palette: ColorPalette) -> Self {
        Self { palette }
    }

    pub fn render<W: Write>(&self, out: &mut W, summary: &RouteSummary) -> io::Result<()> {
        let p = &self.palette;
        let start = summary.start.name.as_deref().unwrap_or("<unnamed>");
        let goal = summary.goal.name.as_deref().unwrap_or("<unnamed>");

        let Some(total) = summary.total_cost else {
            return writeln!(
                out,
                "{}No route{} from {}{}{} to {}{}{}",
                p.red, p.reset, p.white_bold, start, p.reset, p.white_bold, goal, p.reset
            );
        };

        writeln!(
            out,
            "Route from {}{}{} to {}{}{} ({} hops):",
            p.white_bold, start, p.reset, p.white_bold, goal, p.reset, summary.hops
        )?;
        let len = summary.steps.len();
        for (i, step) in summary.steps.iter().enumerate() {
            self.render_step(out, step, i == 0, i + 1 == len)?;
        }
        writeln!(
            out,
            "\nTotal travel time: {}{}{}",
            p.green,
            format_travel_time(total),
            p.reset
        )
    }

    fn render_step<W: Write>(
        &self,
        out: &mut W,
        step: &RouteStep,
        is_first: bool,
        is_last: bool,
    ) -> io::Result<()> {
        let p = &self.palette;
        let (tag_color, tag) = if is_first {
            (p.tag_start, "START")
        } else if is_last {
            (p.tag_goal, "GOAL ")
        } else {
            (p.tag_leg, "LEG  ")
        };
        let name = step.name.as_deref().unwrap_or("<unnamed>");

        if is_first {
            writeln!(
                out,
                "{}{}{} {}{}{} {}#{}{}",
                tag_color, tag, p.reset, p.white_bold, name, p.reset, p.gray, step.id, p.reset
            )
        } else {
            writeln!(
                out,
                "{}{}{} {}{}{} {}#{}{} +{}{}{} (at {})",
                tag_color,
                tag,
                p.reset,
                p.white_bold,
                name,
                p.reset,
                p.gray,
                step.id,
                p.reset,
                p.green,
                format_travel_time(step.leg_cost),
                p.reset,
                format_travel_time(step.cumulative_cost)
            )
        }
    }
}

/// One line of the `regions` listing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RegionListing {
    pub id: RegionId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub neighbours: usize,
}

/// One line of the `terrain` listing.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TerrainListing {
    pub terrain: String,
    pub travel_speed: f64,
}

pub fn render_regions<W: Write>(
    out: &mut W,
    regions: &[RegionListing],
    format: OutputFormat,
) -> io::Result<()> {
    if format == OutputFormat::Json {
        return write_json(out, regions);
    }
    for region in regions {
        match &region.name {
            Some(name) => writeln!(
                out,
                "{:>6}  {} ({} routes)",
                region.id, name, region.neighbours
            )?,
            None => writeln!(out, "{:>6}  ({} routes)", region.id, region.neighbours)?,
        }
    }
    Ok(())
}

pub fn render_terrain<W: Write>(
    out: &mut W,
    terrain: &[TerrainListing],
    format: OutputFormat,
) -> io::Result<()> {
    if format == OutputFormat::Json {
        return write_json(out, terrain);
    }
    for entry in terrain {
        writeln!(out, "{:<16} {:.2}", entry.terrain, entry.travel_speed)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use traderoute_lib::{RouteAlgorithm, RouteEndpoint};

    fn endpoint(id: RegionId, name: &str) -> RouteEndpoint {
        RouteEndpoint {
            id,
            name: Some(name.to_string()),
        }
    }

    fn step(index: usize, id: RegionId, name: &str, leg: f64, total: f64) -> RouteStep {
        RouteStep {
            index,
            id,
            name: Some(name.to_string()),
            leg_cost: leg,
            cumulative_cost: total,
        }
    }

    fn found() -> RouteSummary {
        RouteSummary {
            reachable: true,
            algorithm: RouteAlgorithm::Dijkstra,
            hops: 2,
            start: endpoint(1, "Aldmoor"),
            goal: endpoint(3, "Caldera"),
            total_cost: Some(7.0),
            steps: vec![
                step(0, 1, "Aldmoor", 0.0, 0.0),
                step(1, 2, "Brightwater", 5.0, 5.0),
                step(2, 3, "Caldera", 2.0, 7.0),
            ],
        }
    }

    fn render_to_string(summary: &RouteSummary, format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        render_route(&mut buffer, summary, format).expect("write to vec");
        String::from_utf8(buffer).expect("utf-8 output")
    }

    #[test]
    fn enhanced_renderer_tags_each_step() {
        let mut buffer = Vec::new();
        EnhancedRenderer::new(ColorPalette::plain())
            .render(&mut buffer, &found())
            .expect("write to vec");
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("Route from Aldmoor to Caldera (2 hops):"));
        assert!(text.contains("START Aldmoor #1"));
        assert!(text.contains("LEG   Brightwater #2 +5.00 (at 5.00)"));
        assert!(text.contains("GOAL  Caldera #3 +2.00 (at 7.00)"));
        assert!(text.contains("Total travel time: 7.00"));
    }

    #[test]
    fn enhanced_renderer_reports_unreachable_goal() {
        let summary = RouteSummary {
            reachable: false,
            hops: 0,
            total_cost: None,
            steps: Vec::new(),
            goal: endpoint(4, "Dunhollow"),
            ..found()
        };
        let mut buffer = Vec::new();
        EnhancedRenderer::new(ColorPalette::plain())
            .render(&mut buffer, &summary)
            .unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "No route from Aldmoor to Dunhollow\n"
        );
    }

    #[test]
    fn json_format_is_parseable() {
        let text = render_to_string(&found(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(value["total_cost"], 7.0);
        assert_eq!(value["algorithm"], "dijkstra");
        assert_eq!(value["steps"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn text_format_uses_library_renderer() {
        let text = render_to_string(&found(), OutputFormat::Text);
        assert_eq!(text, found().render(RouteRenderMode::PlainText));
    }

    #[test]
    fn region_listing_text_and_json() {
        let regions = vec![
            RegionListing {
                id: 1,
                name: Some("Aldmoor".to_string()),
                neighbours: 2,
            },
            RegionListing {
                id: 4,
                name: None,
                neighbours: 0,
            },
        ];

        let mut text = Vec::new();
        render_regions(&mut text, &regions, OutputFormat::Text).unwrap();
        let text = String::from_utf8(text).unwrap();
        assert!(text.contains("     1  Aldmoor (2 routes)"));
        assert!(text.contains("     4  (0 routes)"));

        let mut json = Vec::new();
        render_regions(&mut json, &regions, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value[1]["id"], 4);
        assert!(value[1].get("name").is_none());
    }

    #[test]
    fn terrain_listing_text() {
        let terrain = vec![TerrainListing {
            terrain: "plains".to_string(),
            travel_speed: 1.0,
        }];
        let mut out = Vec::new();
        render_terrain(&mut out, &terrain, OutputFormat::Text).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "plains           1.00\n");
    }
}
