//! minic-drv - Pipeline driver for the Mini compiler.
//!
//! The driver runs each input through the stages in order - lex, parse,
//! IR generation, optimization, interpretation - and skips everything
//! downstream of the first stage that leaves diagnostics behind. Each
//! input gets its own artifact directory with the token table, AST tree,
//! both IR listings, the interpreter output, and the error report.

use std::fs;
use std::path::{Path, PathBuf};

use minic_interp::Interpreter;
use minic_ir::{generate, optimize, render_listing};
use minic_lex::Lexer;
use minic_par::ast::render_ast;
use minic_par::Parser;
use minic_util::{Category, Handler};
use thiserror::Error;
use tracing::{debug, info};

/// Driver configuration resolved from the command line.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Source files, processed independently in order.
    pub inputs: Vec<PathBuf>,

    /// Root for artifact directories; next to each input when absent.
    pub out_dir: Option<PathBuf>,
}

/// Failures outside the compilation pipeline proper (I/O).
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Failed to read {path}: {source}")]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteArtifact {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Everything one pipeline run produces.
///
/// Artifacts from stages that never ran (because an earlier stage failed)
/// are `None`; the token table and the report always exist.
#[derive(Debug, Default)]
pub struct PipelineOutput {
    pub token_table: String,
    pub ast_tree: Option<String>,
    pub ir_listing: Option<String>,
    pub optimized_listing: Option<String>,
    pub interpreter_output: Option<String>,
    /// The formatted error report, empty on success.
    pub report: String,
    /// Category of the first failing stage.
    pub failure: Option<Category>,
}

impl PipelineOutput {
    /// The `PRINT OUTPUT:` lines of the interpreter output, in order.
    pub fn print_lines(&self) -> Vec<String> {
        self.interpreter_output
            .as_deref()
            .unwrap_or("")
            .lines()
            .filter_map(|line| line.strip_prefix("PRINT OUTPUT: ").map(str::to_string))
            .collect()
    }
}

/// Runs the full pipeline over one source text.
pub fn run_pipeline(source: &str) -> PipelineOutput {
    let handler = Handler::new();
    let mut output = PipelineOutput::default();

    debug!("lexing");
    let mut lexer = Lexer::new(source, &handler);
    lexer.run();
    output.token_table = lexer.token_table();
    if handler.has_errors() {
        return finish(output, &handler);
    }

    debug!("parsing");
    let mut parser = Parser::new(&mut lexer, &handler);
    let program = parser.parse();
    let Some(program) = program else {
        return finish(output, &handler);
    };
    output.ast_tree = Some(render_ast(&program));

    debug!("generating IR");
    let code = generate(&program);
    output.ir_listing = Some(render_listing(&code));

    debug!("optimizing IR");
    let optimized = optimize(code);
    output.optimized_listing = Some(render_listing(&optimized));

    debug!("interpreting");
    let mut run_log = Vec::new();
    let mut interpreter = Interpreter::new(&handler);
    // Writing to an in-memory buffer cannot fail.
    let _ = interpreter.run(&optimized, &mut run_log);
    output.interpreter_output = Some(String::from_utf8_lossy(&run_log).into_owned());

    finish(output, &handler)
}

fn finish(mut output: PipelineOutput, handler: &Handler) -> PipelineOutput {
    let mut report = Vec::new();
    // Writing to an in-memory buffer cannot fail.
    let _ = handler.report(&mut report);
    output.report = String::from_utf8_lossy(&report).into_owned();
    output.failure = handler.first_category();
    output
}

/// Compiles one input file and writes its artifacts into `out_dir`.
///
/// On failure the error report is also written to standard error.
/// Returns the first failing category, or `None` on success.
pub fn process_file(input: &Path, out_dir: &Path) -> Result<Option<Category>, DriverError> {
    let source = fs::read_to_string(input).map_err(|source| DriverError::ReadInput {
        path: input.to_path_buf(),
        source,
    })?;

    info!(input = %input.display(), "compiling");
    let output = run_pipeline(&source);

    fs::create_dir_all(out_dir).map_err(|source| DriverError::WriteArtifact {
        path: out_dir.to_path_buf(),
        source,
    })?;

    write_artifact(out_dir, "tokens.txt", &output.token_table)?;
    if let Some(ast) = &output.ast_tree {
        write_artifact(out_dir, "ast.txt", ast)?;
    }
    if let Some(ir) = &output.ir_listing {
        write_artifact(out_dir, "ir.txt", ir)?;
    }
    if let Some(optimized) = &output.optimized_listing {
        write_artifact(out_dir, "ir_opt.txt", optimized)?;
    }
    if let Some(run_log) = &output.interpreter_output {
        write_artifact(out_dir, "output.txt", run_log)?;
    }
    write_artifact(out_dir, "errors.log", &output.report)?;

    if output.failure.is_some() {
        eprint!("{}", output.report);
    }
    Ok(output.failure)
}

fn write_artifact(dir: &Path, name: &str, contents: &str) -> Result<(), DriverError> {
    let path = dir.join(name);
    fs::write(&path, contents).map_err(|source| DriverError::WriteArtifact { path, source })
}

/// Processes every configured input independently.
///
/// Returns the category of the first failure across all inputs, or `None`
/// when every input succeeded.
pub fn run_all(config: &Config) -> Result<Option<Category>, DriverError> {
    let mut first_failure = None;
    for input in &config.inputs {
        let dir = artifact_dir(input, config.out_dir.as_deref());
        let outcome = process_file(input, &dir)?;
        if first_failure.is_none() {
            first_failure = outcome;
        }
    }
    Ok(first_failure)
}

/// The artifact directory for one input: `<out_dir>/<stem>` when an
/// output root is given, `<input>.out` next to the input otherwise.
pub fn artifact_dir(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    match out_dir {
        Some(dir) => {
            let stem = input
                .file_stem()
                .map(|s| s.to_os_string())
                .unwrap_or_else(|| input.as_os_str().to_os_string());
            dir.join(stem)
        }
        None => {
            let mut name = input.as_os_str().to_os_string();
            name.push(".out");
            PathBuf::from(name)
        }
    }
}

/// Process exit code for the first failing category.
pub const fn exit_code(category: Category) -> u8 {
    match category {
        Category::Lexical => 1,
        Category::Syntax => 2,
        Category::Semantic => 3,
        Category::Runtime => 4,
    }
}
