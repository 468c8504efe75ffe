//! Renders a recorded state trajectory CSV (`t,x,v,phi,omega`) as an SVG
//! with position and angle plotted over time.
//!
//! Usage: `plot-trajectory -f <states.csv> [-F <states2.csv>] -o <out.svg>`
//! Two `-f`/`-F` inputs render a side-by-side dual view.

use ncs_lab::io::trajectory::TrajectoryRow;
use plotters::prelude::*;

struct Args {
    primary: String,
    secondary: Option<String>,
    output: String,
}

fn usage(prog: &str) -> String {
    format!(
        "Usage: {prog} -f <states.csv> [-F <states2.csv>] -o <out.svg>\n\
         \x20 -f FILE : primary state trajectory CSV\n\
         \x20 -F FILE : optional secondary trajectory, rendered side by side\n\
         \x20 -o FILE : output SVG path\n"
    )
}

fn parse_args() -> Result<Args, String> {
    let mut primary = None;
    let mut secondary = None;
    let mut output = None;

    let mut args = std::env::args().skip(1);
    while let Some(flag) = args.next() {
        let mut value = || args.next().ok_or_else(|| format!("missing value for {flag}"));
        match flag.as_str() {
            "-f" => primary = Some(value()?),
            "-F" => secondary = Some(value()?),
            "-o" => output = Some(value()?),
            other => return Err(format!("unrecognized flag {other}")),
        }
    }

    Ok(Args {
        primary: primary.ok_or("missing required -f <states.csv>")?,
        secondary,
        output: output.ok_or("missing required -o <out.svg>")?,
    })
}

fn load_rows(path: &str) -> Result<Vec<TrajectoryRow>, Box<dyn std::error::Error>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

fn plot_into(area: &DrawingArea<SVGBackend, plotters::coord::Shift>, title: &str, rows: &[TrajectoryRow]) {
    let (top, bottom) = area.split_vertically(area.dim_in_pixel().1 as i32 / 2);

    let t_max = rows.last().map(|r| r.t).unwrap_or(1.0).max(1e-6);
    let x_min = rows.iter().map(|r| r.x).fold(f64::INFINITY, f64::min).min(0.0);
    let x_max = rows.iter().map(|r| r.x).fold(f64::NEG_INFINITY, f64::max).max(x_min + 1e-6);
    let phi_min = rows.iter().map(|r| r.phi).fold(f64::INFINITY, f64::min).min(0.0);
    let phi_max = rows.iter().map(|r| r.phi).fold(f64::NEG_INFINITY, f64::max).max(phi_min + 1e-6);

    let mut x_chart = ChartBuilder::on(&top)
        .caption(format!("{title}: position"), ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(20)
        .y_label_area_size(40)
        .build_cartesian_2d(0.0..t_max, x_min..x_max)
        .expect("build position chart");
    x_chart.configure_mesh().draw().ok();
    x_chart
        .draw_series(LineSeries::new(rows.iter().map(|r| (r.t, r.x)), &BLUE))
        .ok();

    let mut phi_chart = ChartBuilder::on(&bottom)
        .caption(format!("{title}: angle"), ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(20)
        .y_label_area_size(40)
        .build_cartesian_2d(0.0..t_max, phi_min..phi_max)
        .expect("build angle chart");
    phi_chart.configure_mesh().draw().ok();
    phi_chart
        .draw_series(LineSeries::new(rows.iter().map(|r| (r.t, r.phi)), &RED))
        .ok();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{e}\n{}", usage("plot-trajectory"));
            std::process::exit(1);
        }
    };

    let primary_rows = load_rows(&args.primary)?;

    let root = SVGBackend::new(&args.output, (1280, 720)).into_drawing_area();
    root.fill(&WHITE)?;

    match &args.secondary {
        Some(secondary_path) => {
            let secondary_rows = load_rows(secondary_path)?;
            let (left, right) = root.split_horizontally(640);
            plot_into(&left, &args.primary, &primary_rows);
            plot_into(&right, secondary_path, &secondary_rows);
        }
        None => plot_into(&root, &args.primary, &primary_rows),
    }

    root.present()?;
    println!("wrote {}", args.output);
    Ok(())
}
