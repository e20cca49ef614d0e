use anyhow::{Context, Result};
use attnviz_core_kernel::ShuffleHistogram;
use attnviz_core_render::stats::render_histogram;
use attnviz_core_render::{Report, Style, render_screen, to_json, to_yaml};
use attnviz_core_state::VisualizerState;
use attnviz_globals::{GlobalOpts, OutputFormat};
use std::fs::File;
use std::io::{BufWriter, Write};

/// stdout, or the `-o` file when one was given.
pub fn open_writer(globals: &GlobalOpts) -> Result<Box<dyn Write + Send>> {
    let writer: Box<dyn Write + Send> = match &globals.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout()),
    };
    Ok(writer)
}

pub fn style(globals: &GlobalOpts) -> Style {
    // escape codes only make sense on a terminal we are actually drawing to
    if globals.plain || globals.output.is_some() {
        Style::Plain
    } else {
        Style::Color
    }
}

pub fn render_state(state: &VisualizerState, globals: &GlobalOpts) -> Result<String> {
    match globals.format {
        OutputFormat::Pretty => Ok(render_screen(state, style(globals))),
        OutputFormat::Json => to_json(&Report::from_state(state)),
        OutputFormat::Yaml => Ok(format!("---\n{}", to_yaml(&Report::from_state(state))?)),
    }
}

pub fn render_stats(h: &ShuffleHistogram, globals: &GlobalOpts) -> Result<String> {
    match globals.format {
        OutputFormat::Pretty => Ok(render_histogram(h)),
        OutputFormat::Json => to_json(h),
        OutputFormat::Yaml => to_yaml(h),
    }
}

pub fn emit(writer: &mut dyn Write, text: &str) -> Result<()> {
    writeln!(writer, "{}", text).context("writing output")?;
    writer.flush().context("flushing output")
}
