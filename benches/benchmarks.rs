criterion_group! {
    name = benches;
    config = Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.001)
        .sample_size(100)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        evaluating_five_cards,
        evaluating_three_cards,
        arranging_a_deal,
}
criterion_main!(benches);

use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;
use thirteen::cards::deck::Deck;
use thirteen::cards::lookup;
use thirteen::play::engine::play;
use thirteen::strategy::product::Product;
use thirteen::strategy::Scorer;

fn evaluating_five_cards(c: &mut Criterion) {
    let ref mut rng = rand::thread_rng();
    let hands = (0..1000)
        .map(|_| {
            let deal = Deck::new().deal(rng);
            <[thirteen::cards::card::Card; 5]>::try_from(&deal[..5]).unwrap()
        })
        .collect::<Vec<_>>();
    c.bench_function("eval5", |b| {
        b.iter(|| {
            for hand in hands.iter() {
                black_box(lookup::eval5(hand));
            }
        })
    });
}

fn evaluating_three_cards(c: &mut Criterion) {
    let ref mut rng = rand::thread_rng();
    let hands = (0..1000)
        .map(|_| {
            let deal = Deck::new().deal(rng);
            <[thirteen::cards::card::Card; 3]>::try_from(&deal[..3]).unwrap()
        })
        .collect::<Vec<_>>();
    c.bench_function("eval3", |b| {
        b.iter(|| {
            for hand in hands.iter() {
                black_box(lookup::eval3(hand));
            }
        })
    });
}

fn arranging_a_deal(c: &mut Criterion) {
    let ref mut rng = rand::thread_rng();
    let deal = Deck::new().deal(rng);
    let scorer = Scorer::Product(Product);
    c.bench_function("play", |b| b.iter(|| black_box(play(&deal, &scorer))));
}
