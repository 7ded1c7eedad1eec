use clap::{Arg, Command};
use keyplate::{DEFAULT_LANGUAGE, DataMap, DictionarySource, Template};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("keyplate")
        .version("0.1.0")
        .about("Render a keyword template with data and translations")
        .arg(
            Arg::new("template")
                .help("Template file to render")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("data")
                .long("data")
                .short('d')
                .help("JSON file with token values and loop sequences"),
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .short('p')
                .help("Token prefix (default: $)")
                .default_value("$"),
        )
        .arg(
            Arg::new("dict")
                .long("dict")
                .help("Translation dictionary: JSON file, directory of <LANG>.json files, or URL"),
        )
        .arg(
            Arg::new("lang")
                .long("lang")
                .short('l')
                .help("Language code for translations (default: EN)")
                .default_value(DEFAULT_LANGUAGE),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log substitution and fallback details to stderr")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let filter = if matches.get_flag("verbose") {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let template_path = matches
        .get_one::<String>("template")
        .ok_or("missing template argument")?;
    let prefix = matches
        .get_one::<String>("prefix")
        .map(String::as_str)
        .unwrap_or("$");
    let language = matches
        .get_one::<String>("lang")
        .map(String::as_str)
        .unwrap_or(DEFAULT_LANGUAGE);

    let text = tokio::fs::read_to_string(template_path)
        .await
        .map_err(|e| format!("Failed to read template '{}': {}", template_path, e))?;
    let mut template = Template::new(&text, prefix)?;

    if let Some(data_path) = matches.get_one::<String>("data") {
        let content = tokio::fs::read_to_string(data_path)
            .await
            .map_err(|e| format!("Failed to read data '{}': {}", data_path, e))?;
        let data = DataMap::from_json_str(&content)?;
        info!("Applying {} data key(s) from {}", data.len(), data_path);
        template.apply(&data);
    }

    if let Some(reference) = matches.get_one::<String>("dict") {
        info!("Resolving translations from {} for '{}'", reference, language);
        template
            .resolve_translations(DictionarySource::from_reference(reference), language)
            .await?;
    }

    println!("{}", template.render());

    Ok(())
}
