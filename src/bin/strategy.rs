use clap::Parser;
use clap::ValueEnum;
use thirteen::cards::card::Card;
use thirteen::cards::lookup;
use thirteen::cards::rank::Rank;
use thirteen::cards::ranking;
use thirteen::cards::suit::Suit;
use thirteen::strategy::sampled::Sampled;
use thirteen::strategy::Lane;
use thirteen::Probability;

/// prints win percentage tables from saved win tables
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// file to load win tables from
    #[arg(long)]
    from: std::path::PathBuf,
    /// what to print
    #[arg(long, value_enum, default_value = "rank")]
    mode: Mode,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// every rank with its example hand
    Rank,
    /// every distinct hand description
    All,
    /// the endpoints of notable hand ranges
    Ends,
    /// one hand per percentage point
    Percent,
    /// one hand per five percentage points
    Per5,
}

fn main() {
    thirteen::log();
    let args = Args::parse();
    let sampled = match Sampled::load(&args.from) {
        Ok(sampled) => sampled,
        Err(e) => {
            log::error!("failed to load {}: {}", args.from.display(), e);
            std::process::exit(1);
        }
    };
    match args.mode {
        Mode::Rank => ranks(&sampled),
        Mode::All => percents(&sampled, 0.),
        Mode::Percent => percents(&sampled, 100.),
        Mode::Per5 => percents(&sampled, 20.),
        Mode::Ends => ends(&sampled),
    }
}

/// an example hand of the given rank, sized for the lane
fn example(lane: Lane, rank: thirteen::Score) -> Option<Vec<Card>> {
    match lane {
        Lane::Front => lookup::example3(rank).map(|h| h.to_vec()),
        _ => lookup::example5(rank).map(|h| h.to_vec()),
    }
}

/// every rank, its winning percentage, and an example hand
fn ranks(sampled: &Sampled) {
    for lane in Lane::all() {
        println!("{}", lane);
        for (rank, p) in sampled.probabilities(lane).iter().enumerate() {
            if let Some(hand) = example(lane, rank as thirteen::Score) {
                let short = ranking::describe_short(&hand).expect("examples describe");
                println!("{:>5} {:6.2} : {}", rank, 100. * p, short);
            }
        }
        println!();
    }
}

/// one line per step of the winning percentage; zero granularity
/// prints every distinct hand description once
fn percents(sampled: &Sampled, granularity: Probability) {
    for lane in Lane::all() {
        println!("{}", lane);
        let mut oldp = 0.;
        let mut last = String::new();
        for (rank, &p) in sampled.probabilities(lane).iter().enumerate() {
            if granularity != 0. && (p * granularity) as i64 == (oldp * granularity) as i64 {
                continue;
            }
            let hand = match example(lane, rank as thirteen::Score) {
                Some(hand) => hand,
                None => continue,
            };
            // many ranks share a short description, e.g. trips with
            // distinct dropped kickers; show the first of each
            let short = ranking::describe_short(&hand).expect("examples describe");
            if short != last {
                println!("{:5.2} : {}", 100. * p, short);
                last = short;
            }
            oldp = p;
        }
        println!();
    }
}

/// endpoints of hand ranges worth knowing by heart, per lane
fn ends(sampled: &Sampled) {
    let tables: [&[[&str; 2]]; 3] = [&ENDS3, &ENDS5M, &ENDS5B];
    println!("|            |{:^60}| __Winning Percentage__ |", " __Hand Range__");
    println!("|------------|:{}:|:-----------------------|", "-".repeat(58));
    for lane in Lane::all() {
        println!("| {:<10} |{:60}|{:24}|", format!("__{}__", lane), "", "");
        for [weak, strong] in tables[lane as usize] {
            let lo = parse_hand(weak);
            let hi = parse_hand(strong);
            let plo = 100. * sampled.probabilities(lane)[lookup::eval(&lo) as usize];
            let phi = 100. * sampled.probabilities(lane)[lookup::eval(&hi) as usize];
            println!(
                "|{:12}| {:>21} &mdash; {:<21} &nbsp; | {:6.2} &mdash; {:6.2}  |",
                "",
                ranking::describe_short(&lo).expect("endpoints describe"),
                ranking::describe_short(&hi).expect("endpoints describe"),
                plo,
                phi,
            );
        }
    }
    println!();
}

/// hands written as ranks, e.g. "AKQJ9"; a trailing 's' makes a
/// flush. suits otherwise rotate so nothing flushes by accident.
fn parse_hand(written: &str) -> Vec<Card> {
    let rotation = [Suit::Club, Suit::Diamond, Suit::Spade, Suit::Heart, Suit::Club];
    let (written, flush) = match written.strip_suffix('s') {
        Some(stripped) => (stripped, true),
        None => (written, false),
    };
    written.chars()
        .enumerate()
        .map(|(i, c)| {
            let rank = Rank::try_from(c.to_string().as_str()).expect("rank char");
            let suit = match flush {
                true => Suit::Heart,
                false => rotation[i],
            };
            Card::from((suit, rank))
        })
        .collect()
}

const ENDS3: [[&str; 2]; 17] = [
    ["432", "987"],
    ["T32", "QJT"],
    ["K32", "KQJ"],
    ["A32", "AT9"],
    ["AJ2", "AJT"],
    ["AQ2", "AQJ"],
    ["AK2", "AKQ"],
    ["223", "66A"],
    ["772", "77A"],
    ["882", "88A"],
    ["992", "99A"],
    ["TT2", "TTA"],
    ["JJ2", "JJA"],
    ["QQ2", "QQA"],
    ["KK2", "KKA"],
    ["AA2", "AAK"],
    ["222", "AAA"],
];

const ENDS5M: [[&str; 2]; 19] = [
    ["75432", "AKQJ9"],
    ["22345", "TTAKQ"],
    ["JJ432", "JJAKQ"],
    ["QQ432", "QQAKJ"],
    ["KK432", "KKAQJ"],
    ["AA432", "AAKQJ"],
    ["33224", "8877A"],
    ["99223", "TT99A"],
    ["JJ223", "JJTTA"],
    ["QQ223", "QQJJA"],
    ["KK223", "KKQQA"],
    ["AA223", "AAKKQ"],
    ["22234", "AAAKQ"],
    ["A2345", "87654"],
    ["98765", "AKQJT"],
    ["76542s", "AKQJ9s"],
    ["22233", "AAAKK"],
    ["22223", "AAAAK"],
    ["A2345s", "TJQKAs"],
];

const ENDS5B: [[&str; 2]; 19] = [
    ["75432", "AKQJ9"],
    ["22345", "AAKQJ"],
    ["33224", "AAKKQ"],
    ["22234", "AAAKQ"],
    ["A2345", "87654"],
    ["98765", "AKQJT"],
    ["75432s", "T9875s"],
    ["J5432s", "JT986s"],
    ["Q5432s", "QJT97s"],
    ["K5432s", "KJT97s"],
    ["KQ432s", "KQJT8s"],
    ["A6432s", "AJT98s"],
    ["AQ432s", "AQJT9s"],
    ["AK432s", "AKQJ9s"],
    ["22233", "66633"],
    ["77722", "TTT22"],
    ["JJJ22", "AAA22"],
    ["22223", "AAAAK"],
    ["A2345s", "TJQKAs"],
];
