use std::path::Path;

use crate::data::sample::Sample;
use crate::error::Result;
use crate::math::matrix::Matrix;
use crate::network::classifier::DECISION_THRESHOLD;
use crate::network::model::Model;
use crate::report::chart::{escape, line_chart, Series, BLUE_DARK, PANEL_HEIGHT, PANEL_WIDTH, RED_DARK};
use crate::train::history::History;

const TITLE_HEIGHT: f64 = 28.0;

/// Loss panel (train vs validation).
pub fn loss_panel(history: &History) -> String {
    line_chart("Loss", "Epochs", &[
        Series { name: "Train loss", values: &history.loss_train, color: RED_DARK, dashed: false },
        Series { name: "Validation loss", values: &history.loss_valid, color: BLUE_DARK, dashed: true },
    ], None)
}

/// Accuracy panel (train vs validation), y pinned to [0, 1].
pub fn accuracy_panel(history: &History) -> String {
    line_chart("Accuracy", "Epochs", &[
        Series { name: "Train acc.", values: &history.accuracy_train, color: RED_DARK, dashed: false },
        Series { name: "Validation acc.", values: &history.accuracy_valid, color: BLUE_DARK, dashed: true },
    ], Some((0.0, 1.0)))
}

/// Loss and accuracy curves side by side.
pub fn history_figure(title: &str, history: &History) -> String {
    compose(title, &[loss_panel(history), accuracy_panel(history)])
}

/// Shades the model's predicted class over a `resolution × resolution` grid
/// of [-1, 1]² and overlays `samples` coloured by their true label.
pub fn decision_regions<M: Model + ?Sized>(model: &mut M, samples: &[Sample], resolution: usize) -> String {
    let w = PANEL_WIDTH;
    let h = PANEL_HEIGHT;
    let pad = 30.0;
    let side = (h - 2.0 * pad).min(w - 2.0 * pad);
    let left = (w - side) / 2.0;
    let top = pad;
    let res = resolution.max(1);
    let cell = side / res as f64;

    let to_px = |x0: f64, x1: f64| -> (f64, f64) {
        (left + (x0 + 1.0) / 2.0 * side, top + (1.0 - x1) / 2.0 * side)
    };

    // Cell centres, row-major from the top-left corner.
    let centres: Vec<Vec<f64>> = (0..res)
        .flat_map(|r| (0..res).map(move |c| (r, c)))
        .map(|(r, c)| {
            let x0 = -1.0 + (c as f64 + 0.5) * 2.0 / res as f64;
            let x1 = 1.0 - (r as f64 + 0.5) * 2.0 / res as f64;
            vec![x0, x1]
        })
        .collect();
    let probs = model.forward(&Matrix::from_data(centres)).col(0);

    let cells: String = probs.iter().enumerate()
        .map(|(k, &p)| {
            let (r, c) = (k / res, k % res);
            let fill = if p >= DECISION_THRESHOLD { "#fde2e2" } else { "#dbeafe" };
            format!(
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>",
                left + c as f64 * cell, top + r as f64 * cell, cell + 0.1, cell + 0.1, fill
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let points: String = samples.iter()
        .map(|s| {
            let (x, y) = to_px(s.features[0], s.features[1]);
            let color = if s.label == 1.0 { RED_DARK } else { BLUE_DARK };
            format!("<circle class=\"sample\" cx=\"{:.1}\" cy=\"{:.1}\" r=\"3\" fill=\"{}\"/>", x, y, color)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n\
         <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n\
         <text x=\"{:.1}\" y=\"14\" fill=\"#333\" font-size=\"12\" font-weight=\"bold\">Decision regions</text>\n\
         {}\n\
         <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"none\" stroke=\"#999\"/>\n\
         {}\n\
         <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" fill=\"#333\" font-size=\"11\">x0</text>\n\
         <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" fill=\"#333\" font-size=\"11\">x1</text>\n\
         </svg>",
        w, h,
        left,
        cells,
        left, top, side, side,
        points,
        left + side / 2.0, top + side + 18.0,
        left - 6.0, top + side / 2.0,
    )
}

/// Lays out panels left to right under a figure title.
pub fn compose(title: &str, panels: &[String]) -> String {
    let width = PANEL_WIDTH * panels.len().max(1) as f64;
    let height = PANEL_HEIGHT + TITLE_HEIGHT;
    let body: String = panels.iter().enumerate()
        .map(|(i, panel)| {
            format!(
                "<g transform=\"translate({:.1},{:.1})\">\n{}\n</g>",
                i as f64 * PANEL_WIDTH, TITLE_HEIGHT, panel
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n\
         <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n\
         <text x=\"{:.1}\" y=\"20\" text-anchor=\"middle\" fill=\"#333\" font-size=\"14\" font-weight=\"bold\">{}</text>\n\
         {}\n\
         </svg>\n",
        width, height,
        width / 2.0, escape(title),
        body,
    )
}

/// Writes a figure to `path` as a standalone `.svg` file.
pub fn write_figure(path: &Path, svg: &str) -> Result<()> {
    std::fs::write(path, svg)?;
    Ok(())
}
