use std::ffi::OsString;
use std::io::{self, Write};

use restartkit::{
    read_restart_file_with, ProgressObserver, RestartFileContents, SamplerMethod, ScalarField,
};

const DEFAULT_METHOD: SamplerMethod = SamplerMethod::ParaDram;

#[derive(Debug, Clone, PartialEq, Eq)]
enum OutputMode {
    Summary,
    Scalars,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
struct CliOptions {
    file: Option<String>,
    method: SamplerMethod,
    output: OutputMode,
    progress: bool,
    show_help: bool,
}

fn main() {
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let exit_code = run(std::env::args_os(), &mut stdout, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run<I, W, E>(args: I, out: &mut W, err: &mut E) -> i32
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let options = match parse_args(args) {
        Ok(options) => options,
        Err(message) => {
            let _ = writeln!(err, "error: {message}");
            let _ = write_usage(err);
            return 2;
        }
    };

    if options.show_help {
        if write_usage(out).is_err() {
            return 1;
        }
        return 0;
    }

    let Some(file) = options.file else {
        let _ = writeln!(err, "error: missing restart file path");
        let _ = write_usage(err);
        return 2;
    };

    let result = if options.progress {
        read_with_progress(&file, options.method)
    } else {
        read_restart_file_with(&file, options.method)
    };

    let contents = match result {
        Ok(contents) => contents,
        Err(error) => {
            let _ = writeln!(err, "error: {error}");
            return error.exit_code();
        }
    };

    let written = match options.output {
        OutputMode::Summary => write_summary(out, &file, options.method, &contents),
        OutputMode::Scalars => write_scalars_csv(out, &contents),
        OutputMode::Json => serde_json::to_writer_pretty(&mut *out, &contents)
            .map_err(io::Error::from)
            .and_then(|()| writeln!(out)),
    };
    if written.is_err() {
        return 1;
    }
    0
}

/// Progress observer that reports to standard error.
struct StderrProgress;

impl ProgressObserver for StderrProgress {
    fn on_progress(&self, completed: usize, total: usize) {
        eprintln!("decoded {completed}/{total} snapshots");
    }
}

fn read_with_progress(
    file: &str,
    method: SamplerMethod,
) -> restartkit::Result<RestartFileContents> {
    use restartkit::{load_restart_text, RestartDecoder};

    let raw = load_restart_text(file)?;
    RestartDecoder::new(method)?
        .with_observer(Box::new(StderrProgress))
        .decode(&raw)
        .map_err(|error| error.in_file(file, method.name()))
}

fn parse_args<I>(args: I) -> Result<CliOptions, String>
where
    I: IntoIterator<Item = OsString>,
{
    let mut iter = args.into_iter();
    let _argv0 = iter.next();

    let mut file: Option<String> = None;
    let mut method = DEFAULT_METHOD;
    let mut output = OutputMode::Summary;
    let mut progress = false;
    let mut show_help = false;

    while let Some(argument) = iter.next() {
        let arg = argument.to_string_lossy();
        let arg_str = arg.as_ref();

        match arg_str {
            "-h" | "--help" => {
                show_help = true;
            }
            "--scalars" => {
                if output == OutputMode::Json {
                    return Err(String::from("`--scalars` cannot be combined with `--json`"));
                }
                output = OutputMode::Scalars;
            }
            "--json" => {
                if output == OutputMode::Scalars {
                    return Err(String::from("`--json` cannot be combined with `--scalars`"));
                }
                output = OutputMode::Json;
            }
            "--progress" => {
                progress = true;
            }
            "-m" | "--method" => {
                let next = iter
                    .next()
                    .ok_or_else(|| String::from("missing name argument for `-m/--method`"))?;
                method = parse_method(next.to_string_lossy().as_ref())?;
            }
            _ => {
                if let Some(value) = arg_str.strip_prefix("--method=") {
                    method = parse_method(value)?;
                    continue;
                }
                if arg_str.starts_with('-') && arg_str.len() > 1 {
                    return Err(format!("unknown option: {arg_str}"));
                }
                if file.is_some() {
                    return Err(String::from("only one restart file may be provided"));
                }
                file = Some(arg.into_owned());
            }
        }
    }

    Ok(CliOptions {
        file,
        method,
        output,
        progress,
        show_help,
    })
}

fn parse_method(name: &str) -> Result<SamplerMethod, String> {
    name.parse::<SamplerMethod>()
}

fn write_usage<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "usage: restartkit [OPTIONS] <RESTART_FILE>")?;
    writeln!(out)?;
    writeln!(out, "Decode a sampler restart snapshot log.")?;
    writeln!(out)?;
    writeln!(out, "options:")?;
    writeln!(out, "  -m, --method <NAME>  sampler method (default: paradram)")?;
    writeln!(out, "      --scalars        print the scalar table as CSV")?;
    writeln!(out, "      --json           print the full decoded contents as JSON")?;
    writeln!(out, "      --progress       report decode progress on stderr")?;
    writeln!(out, "  -h, --help           show this help")?;
    Ok(())
}

fn write_summary<W: Write>(
    out: &mut W,
    file: &str,
    method: SamplerMethod,
    contents: &RestartFileContents,
) -> io::Result<()> {
    writeln!(out, "file:            {file}")?;
    writeln!(out, "method:          {method}")?;
    writeln!(out, "dimensionality:  {}", contents.dimensionality)?;
    writeln!(out, "snapshots:       {}", contents.snapshot_count())?;
    for field in ScalarField::ALL {
        let column = contents.scalar_table.column(field);
        // Columns are never empty: a decode with zero records fails.
        writeln!(
            out,
            "{}: first {} last {}",
            field.marker(),
            column[0],
            column[column.len() - 1]
        )?;
    }
    Ok(())
}

fn write_scalars_csv<W: Write>(out: &mut W, contents: &RestartFileContents) -> io::Result<()> {
    let header: Vec<&str> = ScalarField::ALL.iter().map(|f| f.marker()).collect();
    writeln!(out, "{}", header.join(","))?;
    for k in 0..contents.snapshot_count() {
        let row: Vec<String> = ScalarField::ALL
            .iter()
            .map(|&field| contents.scalar_table.column(field)[k].to_string())
            .collect();
        writeln!(out, "{}", row.join(","))?;
    }
    Ok(())
}
