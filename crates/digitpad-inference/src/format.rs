// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Weight file formats
//!
//! - **MCU text**: C assignment listing, one weight per line
//!   (`weights[L][J][K] = V;`), as produced by the training tool for
//!   microcontroller builds. `L` is the layer index, `J` the receiving
//!   unit and `K` the sending unit; `K == fan_in - 1` is the bias.
//! - **JSON**: `{ "hidden": [[..]], "output": [[..]] }`, rows per unit.
//! - **Fixed point** (export only): FPGA memory image, weights scaled by
//!   1024 and written as 12-bit two's complement hex.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{InferenceError, Result};
use crate::weights::{Layer, NetworkShape, WeightTables};

const LAYERS: [Layer; 2] = [Layer::Hidden, Layer::Output];

/// Fixed-point scale of the FPGA image
pub const FIXED_POINT_SCALE: f64 = 1024.0;

/// On-disk weight file format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightFormat {
    #[default]
    McuText,
    Json,
}

impl WeightFormat {
    /// Guess from the file extension: `.json` is JSON, anything else MCU text
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => WeightFormat::Json,
            _ => WeightFormat::McuText,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeightFormat::McuText => "mcu_text",
            WeightFormat::Json => "json",
        }
    }
}

impl FromStr for WeightFormat {
    type Err = InferenceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "mcu_text" | "mcu" | "text" | "txt" => Ok(WeightFormat::McuText),
            "json" => Ok(WeightFormat::Json),
            other => Err(InferenceError::UnknownVariant {
                what: "weight format",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct WeightFile {
    hidden: Vec<Vec<f64>>,
    output: Vec<Vec<f64>>,
}

/// Parse an MCU text listing into tables of the given shape
///
/// Every cell must be assigned; a later assignment to the same cell wins.
pub fn parse_mcu_listing(text: &str, shape: NetworkShape) -> Result<WeightTables> {
    let mut tables = WeightTables::zeros(shape);
    let mut assigned = [
        vec![false; shape.units(Layer::Hidden) * shape.fan_in(Layer::Hidden)],
        vec![false; shape.units(Layer::Output) * shape.fan_in(Layer::Output)],
    ];

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let code = match raw.find("//") {
            Some(pos) => &raw[..pos],
            None => raw,
        }
        .trim();
        if code.is_empty() {
            continue;
        }

        let (layer, unit, input, value) =
            parse_assignment(code).map_err(|message| InferenceError::WeightParse { line, message })?;
        let layer = Layer::from_index(layer).ok_or_else(|| InferenceError::WeightParse {
            line,
            message: format!("layer index {} out of range", layer),
        })?;
        tables.set_weight(layer, unit, input, value).map_err(|_| InferenceError::WeightParse {
            line,
            message: format!("{} has no weight [{}][{}]", layer, unit, input),
        })?;
        assigned[layer.index()][unit * shape.fan_in(layer) + input] = true;
    }

    for layer in LAYERS {
        let fan_in = shape.fan_in(layer);
        if let Some(cell) = assigned[layer.index()].iter().position(|&set| !set) {
            return Err(InferenceError::MissingWeight {
                layer,
                unit: cell / fan_in,
                input: cell % fan_in,
            });
        }
    }

    Ok(tables)
}

/// `weights[L][J][K] = V;` → (L, J, K, V)
fn parse_assignment(code: &str) -> core::result::Result<(usize, usize, usize, f64), String> {
    let rest = code
        .strip_prefix("weights")
        .ok_or_else(|| format!("expected 'weights[..]' assignment, found '{}'", code))?;
    let (target, value) = rest
        .split_once('=')
        .ok_or_else(|| "missing '='".to_string())?;

    let indices: Vec<usize> = target
        .trim()
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .ok_or_else(|| format!("malformed index list '{}'", target.trim()))?
        .split("][")
        .map(|index| {
            index
                .trim()
                .parse::<usize>()
                .map_err(|_| format!("invalid index '{}'", index))
        })
        .collect::<core::result::Result<_, _>>()?;
    let [layer, unit, input] = indices[..] else {
        return Err(format!("expected 3 indices, found {}", indices.len()));
    };

    let value = value.trim();
    let value = value
        .strip_suffix(';')
        .ok_or_else(|| "missing ';'".to_string())?
        .trim();
    let value = value
        .parse::<f64>()
        .map_err(|_| format!("invalid weight value '{}'", value))?;

    Ok((layer, unit, input, value))
}

/// Render tables in the MCU text format read by [`parse_mcu_listing`]
pub fn to_mcu_listing(tables: &WeightTables) -> String {
    let mut out = String::new();
    for layer in LAYERS {
        let index = layer.index();
        let _ = writeln!(out, "// Weights from layer {} to layer {}", index, index + 1);
        for (unit, row) in tables.table(layer).rows().into_iter().enumerate() {
            let _ = writeln!(out, "// Weights feeding into layer {}, node {}", index + 1, unit);
            for (input, weight) in row.iter().enumerate() {
                let _ = writeln!(out, "weights[{}][{}][{}] = {:?};", index, unit, input, weight);
            }
            out.push('\n');
        }
    }
    out
}

/// FPGA memory image: `@<addr> 0x<hhh>\t\t// <weight>` per weight
///
/// Each weight is multiplied by [`FIXED_POINT_SCALE`], truncated toward
/// zero and written as the low three hex digits of its 32-bit two's
/// complement. Addresses run across both layers.
pub fn to_fixed_point_listing(tables: &WeightTables) -> String {
    let mut out = String::new();
    let mut address = 0usize;
    for layer in LAYERS {
        let index = layer.index();
        let _ = writeln!(out, "// Weights from layer {} to layer {}", index, index + 1);
        for (unit, row) in tables.table(layer).rows().into_iter().enumerate() {
            let _ = writeln!(out, "// Weights feeding into layer {}, node {}", index + 1, unit);
            for &weight in row.iter() {
                let _ = writeln!(out, "@{} 0x{}\t\t// {:.5}", address, fixed_point_hex(weight), weight);
                address += 1;
            }
        }
    }
    out
}

fn fixed_point_hex(weight: f64) -> String {
    // `as` saturates out-of-range values and maps NaN to 0
    let integral = (weight * FIXED_POINT_SCALE) as i32;
    format!("{:03x}", (integral as u32) & 0xfff)
}

/// Load weight tables from a file
pub fn load_weights(path: &Path, format: WeightFormat, shape: NetworkShape) -> Result<WeightTables> {
    let text = fs::read_to_string(path)?;
    let tables = match format {
        WeightFormat::McuText => parse_mcu_listing(&text, shape)?,
        WeightFormat::Json => {
            let file: WeightFile = serde_json::from_str(&text)?;
            let tables = WeightTables::from_rows(&file.hidden, &file.output)?;
            check_shape(tables.shape(), shape)?;
            tables
        }
    };

    info!(
        path = %path.display(),
        format = format.as_str(),
        hidden = shape.hidden,
        outputs = shape.outputs,
        "Loaded weight tables"
    );
    Ok(tables)
}

fn check_shape(found: NetworkShape, expected: NetworkShape) -> Result<()> {
    for (what, expected, actual) in [
        ("input units", expected.inputs, found.inputs),
        ("hidden units", expected.hidden, found.hidden),
        ("output units", expected.outputs, found.outputs),
    ] {
        if expected != actual {
            return Err(InferenceError::ShapeMismatch {
                what,
                expected,
                actual,
            });
        }
    }
    Ok(())
}

/// Render tables as pretty-printed JSON `{ "hidden": [...], "output": [...] }`
pub fn to_json(tables: &WeightTables) -> Result<String> {
    Ok(serde_json::to_string_pretty(&WeightFile {
        hidden: tables.to_rows(Layer::Hidden),
        output: tables.to_rows(Layer::Output),
    })?)
}

/// Write weight tables to a file
pub fn save_weights(tables: &WeightTables, path: &Path, format: WeightFormat) -> Result<()> {
    let text = match format {
        WeightFormat::McuText => to_mcu_listing(tables),
        WeightFormat::Json => to_json(tables)?,
    };
    fs::write(path, text)?;
    debug!(path = %path.display(), format = format.as_str(), "Saved weight tables");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_shape() -> NetworkShape {
        NetworkShape::new(2, 1, 2)
    }

    const SMALL_LISTING: &str = "\
// Weights from layer 0 to layer 1
// Weights feeding into layer 1, node 0
weights[0][0][0] = 0.5;
weights[0][0][1] = -0.25;
weights[0][0][2] = 1.0E-3;

// Weights from layer 1 to layer 2
// Weights feeding into layer 2, node 0
weights[1][0][0] = 2;
weights[1][0][1] = 0.0;
// Weights feeding into layer 2, node 1
weights[1][1][0] = -1.5;   // trailing comment
weights[1][1][1] = 0.75;
";

    #[test]
    fn test_parse_listing() {
        let tables = parse_mcu_listing(SMALL_LISTING, small_shape()).unwrap();
        assert_eq!(tables.weight(Layer::Hidden, 0, 1), Some(-0.25));
        assert_eq!(tables.bias(Layer::Hidden, 0), Some(0.001));
        assert_eq!(tables.weight(Layer::Output, 0, 0), Some(2.0));
        assert_eq!(tables.bias(Layer::Output, 1), Some(0.75));
    }

    #[test]
    fn test_missing_cell_is_reported() {
        let listing = SMALL_LISTING.replace("weights[1][1][0] = -1.5;", "");
        assert!(matches!(
            parse_mcu_listing(&listing, small_shape()),
            Err(InferenceError::MissingWeight { layer: Layer::Output, unit: 1, input: 0 })
        ));
    }

    #[test]
    fn test_parse_errors_carry_line_numbers() {
        let listing = SMALL_LISTING.replace("weights[0][0][1] = -0.25;", "weights[0][0][1] = abc;");
        match parse_mcu_listing(&listing, small_shape()) {
            Err(InferenceError::WeightParse { line, message }) => {
                assert_eq!(line, 4);
                assert!(message.contains("abc"));
            }
            other => panic!("unexpected result: {:?}", other),
        }

        let listing = SMALL_LISTING.replace("weights[1][0][1]", "weights[1][5][1]");
        assert!(matches!(
            parse_mcu_listing(&listing, small_shape()),
            Err(InferenceError::WeightParse { line: 10, .. })
        ));

        assert!(matches!(
            parse_mcu_listing("weights[2][0][0] = 1;", small_shape()),
            Err(InferenceError::WeightParse { line: 1, .. })
        ));
        assert!(matches!(
            parse_mcu_listing("weights[0][0] = 1;", small_shape()),
            Err(InferenceError::WeightParse { line: 1, .. })
        ));
        assert!(matches!(
            parse_mcu_listing("weights[0][0][0] = 1", small_shape()),
            Err(InferenceError::WeightParse { line: 1, .. })
        ));
    }

    #[test]
    fn test_listing_export_parses_back() {
        let tables = parse_mcu_listing(SMALL_LISTING, small_shape()).unwrap();
        let listing = to_mcu_listing(&tables);
        assert!(listing.starts_with("// Weights from layer 0 to layer 1\n"));
        assert!(listing.contains("weights[1][1][0] = -1.5;"));
        assert_eq!(parse_mcu_listing(&listing, small_shape()).unwrap(), tables);
    }

    #[test]
    fn test_fixed_point_listing() {
        let tables = parse_mcu_listing(SMALL_LISTING, small_shape()).unwrap();
        let listing = to_fixed_point_listing(&tables);
        let lines: Vec<&str> = listing.lines().filter(|l| l.starts_with('@')).collect();

        assert_eq!(lines.len(), 3 + 4);
        assert_eq!(lines[0], "@0 0x200\t\t// 0.50000");
        // -256 => 0xffffff00
        assert_eq!(lines[1], "@1 0xf00\t\t// -0.25000");
        // 1.024 truncates to 1
        assert_eq!(lines[2], "@2 0x001\t\t// 0.00100");
        assert_eq!(lines[3], "@3 0x800\t\t// 2.00000");
        assert_eq!(lines[5], "@5 0xa00\t\t// -1.50000");
    }

    #[test]
    fn test_format_names() {
        assert_eq!("mcu_text".parse::<WeightFormat>().unwrap(), WeightFormat::McuText);
        assert_eq!("MCU-text".parse::<WeightFormat>().unwrap(), WeightFormat::McuText);
        assert_eq!("json".parse::<WeightFormat>().unwrap(), WeightFormat::Json);
        assert!("csv".parse::<WeightFormat>().is_err());
        assert_eq!(WeightFormat::from_path(Path::new("w.JSON")), WeightFormat::Json);
        assert_eq!(WeightFormat::from_path(Path::new("weights.txt")), WeightFormat::McuText);
    }
}
