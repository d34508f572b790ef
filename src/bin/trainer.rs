use clap::Parser;
use thirteen::strategy::product::Product;
use thirteen::strategy::rollout::Rollout;
use thirteen::strategy::sampled::Sampled;
use thirteen::strategy::train::compare;
use thirteen::strategy::train::train;
use thirteen::strategy::Scorer;

/// trains win tables by iterated self play, and matches strategies
/// against a rollout opponent
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// file to read win tables from; the product baseline otherwise
    #[arg(long)]
    from: Option<std::path::PathBuf>,
    /// file to write trained win tables to
    #[arg(long)]
    to: Option<std::path::PathBuf>,
    /// how many hands to train on per cycle
    #[arg(long, default_value_t = 0)]
    hands: usize,
    /// how many training cycles to run
    #[arg(long, default_value_t = 1)]
    cycles: usize,
    /// how many samples build the evaluation opponent
    #[arg(long, default_value_t = 10_000)]
    samples: usize,
    /// how many hands to evaluate the result on
    #[arg(long, default_value_t = 0)]
    eval_hands: usize,
    /// treat lanes as independent in the evaluation opponent
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    separable: bool,
    /// redo the rollout for every evaluated deal
    #[arg(long)]
    roll_all: bool,
    /// progress interval during evaluation
    #[arg(long, default_value_t = 100)]
    print_every: usize,
}

fn main() {
    thirteen::log();
    let args = Args::parse();
    if args.to.is_none() && args.eval_hands == 0 {
        log::error!("nothing to do: pass --to to save training, or --eval-hands to evaluate");
        std::process::exit(2);
    }
    if args.eval_hands > 0 && args.samples == 0 {
        log::error!("--samples must be positive when evaluating");
        std::process::exit(2);
    }
    let mut hero = match args.from {
        Some(ref path) => match Sampled::load(path) {
            Ok(sampled) => Scorer::Sampled(sampled),
            Err(e) => {
                log::error!("failed to load {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Scorer::Product(Product),
    };
    if args.hands > 0 {
        for cycle in 0..args.cycles {
            log::info!("{:<24}{}/{}", "training cycle", cycle + 1, args.cycles);
            hero = Scorer::Sampled(train(hero, args.hands));
        }
    }
    if let Some(ref path) = args.to {
        match hero {
            Scorer::Sampled(ref sampled) => match sampled.save(path) {
                Ok(()) => log::info!("{:<24}{}", "saved", path.display()),
                Err(e) => {
                    log::error!("failed to save {}: {}", path.display(), e);
                    std::process::exit(1);
                }
            },
            _ => {
                log::error!("nothing trained to save");
                std::process::exit(2);
            }
        }
    }
    if args.eval_hands == 0 {
        return;
    }
    log::info!("{:<24}{} samples", "rolling out opponent", args.samples);
    let villain = Rollout::new(hero.clone(), args.samples, args.separable, !args.roll_all);
    let villain = Scorer::Rollout(villain);
    log::info!("{:<24}{} hands", "running comparison", args.eval_hands);
    let result = compare(&hero, &villain, args.eval_hands, args.print_every);
    println!("{}", result);
}
