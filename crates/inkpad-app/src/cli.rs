//! Command-line front end for the notebook.

use crate::config::{ConfigError, NotebookConfig};
use crate::notebook::{Notebook, NotebookError};
use clap::{Parser, Subcommand};
use inkpad_core::{FileStorage, HexColor, Point, StorageError, ToolKind};
use inkpad_render::{export_file_name, RenderError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("No page with id {0}")]
    UnknownPage(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Notebook(#[from] NotebookError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Freehand notebook with pages, undo/redo and PNG export.
#[derive(Parser, Debug)]
#[command(name = "inkpad", version)]
pub struct CliArgs {
    /// Directory holding the notebook. Overrides INKPAD_DATA_DIR.
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List pages; the current page is marked with `*`
    List,
    /// Add a page at the top and switch to it
    NewPage,
    /// Switch to a page by id
    Switch { id: String },
    /// Draw one stroke on the current page
    Draw {
        /// pen, highlighter or eraser
        tool: ToolKind,
        /// #rrggbb or #rgb
        color: HexColor,
        width: f64,
        /// Canvas points as x,y
        #[arg(
            required = true,
            num_args = 1..,
            allow_hyphen_values = true,
            value_parser = parse_point
        )]
        points: Vec<Point>,
    },
    /// Undo the last change on the current page
    Undo,
    /// Redo the last undone change on the current page
    Redo,
    /// Remove every stroke from the current page
    Clear,
    /// Write the current page as PNG, named after its title by default
    Export { path: Option<PathBuf> },
    /// Write a PNG thumbnail for every page
    Thumbnails { dir: PathBuf },
}

fn parse_point(s: &str) -> Result<Point, String> {
    let err = || format!("invalid point {:?}, expected x,y", s);
    let (x, y) = s.split_once(',').ok_or_else(err)?;
    let x: f64 = x.trim().parse().map_err(|_| err())?;
    let y: f64 = y.trim().parse().map_err(|_| err())?;
    if !x.is_finite() || !y.is_finite() {
        return Err(err());
    }
    Ok(Point::new(x, y))
}

/// Open the notebook in file storage and run one command, writing any
/// listing to `out`.
pub fn run(args: CliArgs, config: NotebookConfig, out: &mut impl Write) -> Result<(), CliError> {
    let mut config = config;
    if let Some(dir) = args.data_dir {
        config = config.with_data_dir(dir);
    }
    let storage = match &config.data_dir {
        Some(dir) => FileStorage::new(dir.clone())?,
        None => FileStorage::default_location()?,
    };
    log::debug!("Using storage at {}", storage.base_path().display());

    let mut notebook = Notebook::open(Arc::new(storage), config)?;

    match args.command {
        Command::List => {
            for summary in notebook.document().page_summaries() {
                let marker = if summary.is_current { '*' } else { ' ' };
                writeln!(
                    out,
                    "{} {}  {}  ({} strokes)",
                    marker, summary.id, summary.title, summary.stroke_count
                )
                .map_err(|source| io_error("stdout", source))?;
            }
        }
        Command::NewPage => {
            let id = notebook.add_page();
            writeln!(out, "{}", id).map_err(|source| io_error("stdout", source))?;
        }
        Command::Switch { id } => {
            if !notebook.switch_page(&id) {
                return Err(CliError::UnknownPage(id));
            }
        }
        Command::Draw {
            tool,
            color,
            width,
            points,
        } => {
            notebook.set_tool(tool);
            notebook.set_color(color);
            notebook.set_width(width);
            let mut points = points.into_iter();
            if let Some(first) = points.next() {
                notebook.begin_gesture(first);
                for point in points {
                    notebook.extend_gesture(point);
                }
                notebook.end_gesture();
            }
        }
        Command::Undo => {
            if !notebook.undo() {
                log::info!("Nothing to undo");
            }
        }
        Command::Redo => {
            if !notebook.redo() {
                log::info!("Nothing to redo");
            }
        }
        Command::Clear => notebook.clear(),
        Command::Export { path } => {
            let image = notebook.export_png()?;
            let path = path.unwrap_or_else(|| PathBuf::from(&image.file_name));
            write_file(&path, &image.png)?;
            writeln!(out, "{}", path.display()).map_err(|source| io_error("stdout", source))?;
        }
        Command::Thumbnails { dir } => {
            fs::create_dir_all(&dir).map_err(|source| io_error(&dir, source))?;
            for (index, entry) in notebook.page_list()?.into_iter().enumerate() {
                let name = format!("{:02}-{}", index + 1, export_file_name(&entry.summary.title));
                let path = dir.join(name);
                write_file(&path, &entry.thumbnail.to_png()?)?;
                writeln!(out, "{}", path.display()).map_err(|source| io_error("stdout", source))?;
            }
        }
    }

    if notebook.failed_saves() > 0 {
        log::warn!("{} autosave(s) failed", notebook.failed_saves());
    }
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), CliError> {
    fs::write(path, bytes).map_err(|source| io_error(path, source))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

fn io_error(path: impl AsRef<Path>, source: std::io::Error) -> CliError {
    CliError::Io {
        path: path.as_ref().to_path_buf(),
        source,
    }
}
