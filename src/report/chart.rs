// ---------------------------------------------------------------------------
// SVG line chart
// ---------------------------------------------------------------------------

pub const PANEL_WIDTH: f64 = 420.0;
pub const PANEL_HEIGHT: f64 = 260.0;

const PAD_L: f64 = 52.0;
const PAD_R: f64 = 16.0;
const PAD_T: f64 = 34.0;
const PAD_B: f64 = 38.0;

const GREY_GRID: &str = "#f0f2f5";
const GREY_TEXT: &str = "#999";
const DARK_TEXT: &str = "#333";

pub const RED_DARK: &str = "#dc2626";
pub const BLUE_DARK: &str = "#1e40af";

/// One named curve. Non-finite values are left out of the path.
#[derive(Debug, Clone, Copy)]
pub struct Series<'a> {
    pub name: &'a str,
    pub values: &'a [f64],
    pub color: &'a str,
    pub dashed: bool,
}

/// Renders `series` against epoch number as a standalone `<svg>` panel.
///
/// `y_range` pins the axis (e.g. `(0, 1)` for accuracy); otherwise the axis
/// runs from 0 to 5% above the largest finite value.
pub fn line_chart(title: &str, x_label: &str, series: &[Series<'_>], y_range: Option<(f64, f64)>) -> String {
    let w = PANEL_WIDTH;
    let h = PANEL_HEIGHT;
    let n = series.iter().map(|s| s.values.len()).max().unwrap_or(0);

    let (min_y, max_y) = y_range.unwrap_or_else(|| {
        let max = series.iter()
            .flat_map(|s| s.values.iter())
            .filter(|v| v.is_finite())
            .cloned()
            .fold(0.0f64, f64::max);
        (0.0, if max > 0.0 { max * 1.05 } else { 1.0 })
    });

    let px = |i: usize, v: f64| -> (f64, f64) {
        let span = (n.max(2) - 1) as f64;
        let x = PAD_L + (i as f64 / span) * (w - PAD_L - PAD_R);
        let y = PAD_T + (max_y - v) / (max_y - min_y + 1e-12) * (h - PAD_T - PAD_B);
        (x, y)
    };

    // Y axis labels and grid.
    let y_labels: String = (0..=4).map(|g| {
        let frac = g as f64 / 4.0;
        let val  = min_y + (max_y - min_y) * frac;
        let y    = PAD_T + (1.0 - frac) * (h - PAD_T - PAD_B);
        format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" fill=\"{}\" font-size=\"10\">{:.3}</text>\n\
             <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"1\"/>",
            PAD_L - 4.0, y + 4.0, GREY_TEXT, val,
            PAD_L, y, w - PAD_R, y, GREY_GRID
        )
    }).collect::<Vec<_>>().join("\n");

    // X axis labels: first, middle, last epoch.
    let x_labels: String = if n == 0 {
        String::new()
    } else {
        let mut ticks = vec![0, n / 2, n - 1];
        ticks.dedup();
        ticks.iter().map(|&i| {
            let (x, _) = px(i, min_y);
            format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" fill=\"{}\" font-size=\"10\">{}</text>",
                x, h - PAD_B + 14.0, GREY_TEXT, i + 1
            )
        }).collect::<Vec<_>>().join("\n")
    };

    let paths: String = series.iter()
        .map(|s| {
            let d = path_data(s.values, &px);
            let dash = if s.dashed { " stroke-dasharray=\"5,4\"" } else { "" };
            format!(
                "<path class=\"series\" d=\"{}\" stroke=\"{}\" stroke-width=\"2\" fill=\"none\"{}/>",
                d, s.color, dash
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let legend: String = series.iter().enumerate()
        .map(|(i, s)| {
            let lx = PAD_L + 8.0 + i as f64 * 120.0;
            let dash = if s.dashed { " stroke-dasharray=\"4,3\"" } else { "" };
            format!(
                "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"2\"{}/>\n\
                 <text x=\"{:.1}\" y=\"{:.1}\" fill=\"{}\" font-size=\"10\">{}</text>",
                lx, PAD_T - 8.0, lx + 18.0, PAD_T - 8.0, s.color, dash,
                lx + 22.0, PAD_T - 4.0, DARK_TEXT, escape(s.name)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n\
         <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n\
         <text x=\"{:.1}\" y=\"14\" fill=\"{}\" font-size=\"12\" font-weight=\"bold\">{}</text>\n\
         {}\n{}\n{}\n{}\n\
         <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" fill=\"{}\" font-size=\"11\">{}</text>\n\
         </svg>",
        w, h,
        PAD_L, DARK_TEXT, escape(title),
        y_labels, x_labels, paths, legend,
        PAD_L + (w - PAD_L - PAD_R) / 2.0, h - 6.0, DARK_TEXT, escape(x_label),
    )
}

/// `M x,y L x,y ...`, restarting the sub-path after any non-finite gap.
fn path_data<F>(values: &[f64], px: &F) -> String
where
    F: Fn(usize, f64) -> (f64, f64),
{
    let mut d = String::new();
    let mut pen_down = false;
    for (i, &v) in values.iter().enumerate() {
        if !v.is_finite() {
            pen_down = false;
            continue;
        }
        let (x, y) = px(i, v);
        let cmd = if pen_down { " L" } else { " M" };
        d.push_str(&format!("{}{:.1},{:.1}", cmd, x, y));
        pen_down = true;
    }
    d.trim_start().to_owned()
}

pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}
