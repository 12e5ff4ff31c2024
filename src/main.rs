use scrawl::PipelineError;
use std::env;
use std::path::Path;

fn usage(program: &str) -> ! {
    eprintln!("Render reMarkable stroke files onto PDF pages.");
    eprintln!();
    eprintln!("Usage: {program} annotate <strokes-dir> <input.pdf> <output.pdf>");
    eprintln!("       {program} notebook <strokes-dir> <output.pdf>");
    eprintln!();
    eprintln!("A strokes directory holds one <page>.rm file per page, with");
    eprintln!("optional <page>-metadata.json sidecars for layer colors.");
    std::process::exit(1);
}

fn main() -> Result<(), PipelineError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("scrawl");

    match args.get(1).map(String::as_str) {
        Some("annotate") if args.len() == 5 => {
            println!("Annotating {} with strokes from {}", args[3], args[2]);
            scrawl::annotate_pdf(Path::new(&args[3]), Path::new(&args[2]), Path::new(&args[4]))?;
            println!("Successfully wrote {}", args[4]);
        }
        Some("notebook") if args.len() == 4 => {
            println!("Rendering notebook from {}", args[2]);
            scrawl::render_notebook(Path::new(&args[2]), Path::new(&args[3]))?;
            println!("Successfully wrote {}", args[3]);
        }
        _ => usage(program),
    }
    Ok(())
}
