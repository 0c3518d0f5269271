use std::fs::File;
use std::io::{BufReader, Write};

use clap::Parser;

use blossom_match::cli::Cli;
use blossom_match::error::Error;
use blossom_match::{dimacs, driver};

fn main() {
    match real_main(std::env::args_os()) {
        Ok(code) => std::process::exit(code),
        Err(error) => {
            eprintln!("blossom-match: {error}");
            std::process::exit(1);
        }
    }
}

fn real_main<I, T>(args: I) -> Result<i32, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::try_parse_from(args).map_err(|e| Error::Usage(e.to_string()))?;

    stderrlog::new()
        .module(module_path!())
        .verbosity(if cli.verbose { 3 } else { 1 })
        .init()
        .map_err(|e| Error::Internal(format!("logger already initialized: {e}")))?;

    let path = cli.input.display().to_string();
    let file = File::open(&cli.input).map_err(|source| Error::Io {
        path: path.clone(),
        source,
    })?;
    let graph = dimacs::parse(BufReader::new(file), &path)?;

    let matching = driver::solve(&graph)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    print_matching(&mut out, graph.num_nodes(), &matching)?;

    Ok(0)
}

fn print_matching<W: Write>(
    out: &mut W,
    num_nodes: usize,
    matching: &blossom_match::matching::Matching,
) -> Result<(), Error> {
    let to_io_error = |source: std::io::Error| Error::Io {
        path: "<stdout>".to_string(),
        source,
    };
    writeln!(out, "p edge {} {}", num_nodes, matching.size()).map_err(to_io_error)?;
    for (u, v) in matching.edges() {
        writeln!(out, "e {} {}", u + 1, v + 1).map_err(to_io_error)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_wrong_argument_count() {
        assert!(real_main(["blossom-match"]).is_err());
        assert!(real_main(["blossom-match", "a.dimacs", "b.dimacs"]).is_err());
    }

    #[test]
    fn rejects_unreadable_path() {
        let result = real_main(["blossom-match", "/nonexistent/path/to/graph.dimacs"]);
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
