use egg_hunt_words::config::{AppConfig, SpeechConfig};
use egg_hunt_words::error::{AppError, AppResult};
use egg_hunt_words::games;
use egg_hunt_words::logging;
use egg_hunt_words::progress::ProgressStore;
use egg_hunt_words::session::Session;
use egg_hunt_words::speech::{CommandSpeaker, SilentSpeaker, Speaker};
use egg_hunt_words::ui::hunt::{self, App, Launch};
use egg_hunt_words::words::Grade;
use std::env;

fn main()
{
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> AppResult<()>
{
    let mut args = env::args().skip(1).peekable();
    let command = match args.peek() {
        Some(arg) if !arg.starts_with("--") || arg == "--help" => args.next(),
        _ => None,
    };
    let rest: Vec<String> = args.collect();
    match command.as_deref() {
        None | Some("play") => play(&rest, None),
        Some("list") => {
            list_games();
            Ok(())
        }
        Some("word-jump") => {
            let (word, options) = split_positional(&rest);
            let word = word.ok_or_else(|| AppError::Usage("word-jump needs a word to spell".to_string()))?;
            play(options, Some(Launch::WordJump(word.to_lowercase())))
        }
        Some("memory-match") => {
            let (grade, options) = split_positional(&rest);
            let grade = grade
                .map(|value| value.parse::<Grade>().map_err(AppError::Usage))
                .transpose()?;
            play_memory(options, grade)
        }
        Some("reset") => reset(&rest),
        Some("-h") | Some("--help") => {
            print_help();
            Ok(())
        }
        Some(other) => Err(AppError::Usage(format!("Unknown command '{other}'. Run with --help."))),
    }
}

fn split_positional(args: &[String]) -> (Option<String>, &[String])
{
    match args.first() {
        Some(first) if !first.starts_with("--") => (Some(first.clone()), &args[1..]),
        _ => (None, args),
    }
}

fn play_memory(options: &[String], grade: Option<Grade>) -> AppResult<()>
{
    let config = AppConfig::from_args(options)?;
    let grade = grade.or(config.grade).unwrap_or(Grade::Lower);
    start(config, Launch::MemoryMatch(grade))
}

fn play(options: &[String], launch: Option<Launch>) -> AppResult<()>
{
    let config = AppConfig::from_args(options)?;
    let launch = launch.unwrap_or(Launch::Hunt(config.grade));
    start(config, launch)
}

fn start(config: AppConfig, launch: Launch) -> AppResult<()>
{
    logging::init(&config.log_path)?;
    log::info!("starting, progress file {}", config.save_path.display());

    let store = ProgressStore::new(&config.save_path);
    let progress = store.load()?;
    let speaker: Box<dyn Speaker> = match &config.speech {
        SpeechConfig::Off => Box::new(SilentSpeaker),
        SpeechConfig::Command(command) => match CommandSpeaker::from_command_line(command) {
            Some(speaker) => Box::new(speaker),
            None => Box::new(SilentSpeaker),
        },
    };

    let app = App::new(Session::from_progress(progress), store, speaker, config.spawn);
    hunt::run(app, launch)
}

fn reset(options: &[String]) -> AppResult<()>
{
    let config = AppConfig::from_args(options)?;
    let store = ProgressStore::new(&config.save_path);
    store.clear()?;
    println!("Progress cleared ({})", store.path().display());
    Ok(())
}

fn list_games()
{
    println!("Available mini-games:");
    for game in games::registry() {
        println!("  {:<13} - {}", game.name, game.description);
    }
}

fn print_help()
{
    println!("egg-hunt-words");
    println!("\nUsage:");
    println!("  egg-hunt-words [play] [options]");
    println!("  egg-hunt-words list");
    println!("  egg-hunt-words word-jump <word> [options]");
    println!("  egg-hunt-words memory-match [1-2|3-4|5-6] [options]");
    println!("  egg-hunt-words reset [--save <path>]");
    println!("\nOptions:");
    println!("  --grade <1-2|3-4|5-6>   skip the grade menu");
    println!("  --save <path>           progress file (env EGG_HUNT_SAVE)");
    println!("  --log <path>            log file (env EGG_HUNT_LOG, filter with RUST_LOG)");
    println!("  --spawn-every <ms>      word-jump drops a new letter every <ms>");
    println!("  --speech-command <cmd>  text-to-speech program (env EGG_HUNT_SPEECH)");
    println!("  --no-speech             do not pronounce words");
}
