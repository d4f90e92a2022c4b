// Plotly payload builders. The webview hands these straight to
// Plotly.newPlot; the Rust side only shapes the data the backend computed.

use crate::models::{FieldData, PatternData};
use serde_json::{json, Value};

/// Heatmap of the interference field, dB-scaled with a fixed [-40, 0] range
pub fn interference_map(field: &FieldData) -> Value {
    let rows = field.field.len();
    let cols = field.field.first().map(Vec::len).unwrap_or(0);

    let [x_min, x_max, y_min, y_max] = field.extent;
    let dx = if cols > 1 {
        (x_max - x_min) / (cols - 1) as f64
    } else {
        0.0
    };
    let dy = if rows > 1 {
        (y_max - y_min) / (rows - 1) as f64
    } else {
        0.0
    };

    json!({
        "data": [{
            "z": &field.field,
            "type": "heatmap",
            "colorscale": "Jet",
            "zmin": -40,
            "zmax": 0,
            "x0": x_min,
            "dx": dx,
            "y0": y_min,
            "dy": dy,
        }],
        "layout": {
            "title": "Interference Map",
            "xaxis": { "title": "X (m)" },
            "yaxis": { "title": "Y (m)", "scaleanchor": "x" },
            "autosize": true,
            "margin": { "t": 40, "r": 40, "b": 40, "l": 40 },
        },
    })
}

/// Polar plot of the beam pattern. Theta arrives in radians; the trace wants
/// degrees in [0, 360) with 0° at east.
pub fn beam_pattern(pattern: &PatternData) -> Value {
    let theta_deg: Vec<f64> = pattern.theta.iter().map(|&rad| theta_to_deg(rad)).collect();

    json!({
        "data": [{
            "r": &pattern.pattern,
            "theta": theta_deg,
            "mode": "lines",
            "type": "scatterpolar",
            "fill": "toself",
            "line": { "width": 2, "color": "#6e8efb" },
            "fillcolor": "rgba(110, 142, 251, 0.3)",
        }],
        "layout": {
            "title": "Beam Pattern",
            "polar": {
                "radialaxis": {
                    "visible": true,
                    "angle": 0,
                    "tickangle": 0,
                    "range": [-40, 0],
                    "tickfont": { "size": 10 },
                    "title": "dB",
                },
                "angularaxis": {
                    "direction": "counterclockwise",
                    "rotation": 0,
                    "tickmode": "array",
                    "tickvals": [0, 90, 180, 270],
                    "ticktext": ["0°", "90°", "180°", "270°"],
                },
            },
            "autosize": true,
            "margin": { "t": 40, "r": 40, "b": 40, "l": 40 },
        },
    })
}

/// Radians to display degrees: wrap negatives into [0, 360), then rotate a
/// quarter turn clockwise so 0° sits at east
pub fn theta_to_deg(rad: f64) -> f64 {
    let mut deg = rad.to_degrees();
    if deg < 0.0 {
        deg += 360.0;
    }
    (deg + 90.0) % 360.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_theta_wraps_and_rotates() {
        assert_eq!(theta_to_deg(0.0), 90.0);
        assert_eq!(theta_to_deg(PI / 2.0), 180.0);
        assert_eq!(theta_to_deg(PI), 270.0);
        assert_eq!(theta_to_deg(-PI / 2.0), 0.0);
    }

    #[test]
    fn test_heatmap_steps_come_from_the_extent() {
        let field = FieldData {
            field: vec![vec![0.0; 5]; 3],
            extent: [-2.0, 2.0, 0.0, 1.0],
        };
        let payload = interference_map(&field);
        let trace = &payload["data"][0];

        assert_eq!(trace["x0"], -2.0);
        assert_eq!(trace["dx"], 1.0);
        assert_eq!(trace["y0"], 0.0);
        assert_eq!(trace["dy"], 0.5);
        assert_eq!(trace["colorscale"], "Jet");
    }

    #[test]
    fn test_degenerate_grids_do_not_divide_by_zero() {
        let field = FieldData {
            field: vec![vec![0.0]],
            extent: [0.0, 1.0, 0.0, 1.0],
        };
        let payload = interference_map(&field);
        assert_eq!(payload["data"][0]["dx"], 0.0);
        assert_eq!(payload["data"][0]["dy"], 0.0);
    }

    #[test]
    fn test_beam_pattern_trace_is_polar() {
        let pattern = PatternData {
            theta: vec![0.0, PI],
            pattern: vec![-3.0, -20.0],
        };
        let payload = beam_pattern(&pattern);
        let trace = &payload["data"][0];

        assert_eq!(trace["type"], "scatterpolar");
        assert_eq!(trace["theta"][0], 90.0);
        assert_eq!(trace["theta"][1], 270.0);
        assert_eq!(trace["r"][1], -20.0);
    }
}
