//! End-to-end scenarios: classic probability puzzles solved through the
//! public API only.
//!
//! Each test builds its distributions from scratch and checks the final
//! probabilities, so a regression anywhere in construction, flattening,
//! transforms or the combinator shows up here.

use odds_rs::builders::{coin, d12, d20, d4, d6, uniform, uniform_with};
use odds_rs::{
    distribution, helpers, join, BuildOptions, Distribution, Odds, PlotOptions, Solution, Spec, Value,
    REST,
};
use pretty_assertions::assert_eq;

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {expected} (±{tolerance}), got {actual}"
    );
}

// ============================================================================
// 1-2. Probability lookup is relative to the total
// ============================================================================

#[test]
fn test_fair_coin_probability() {
    let coin = distribution! { Heads = 0.5, Tails = 0.5 }.unwrap();
    assert_eq!(coin.probability(&"Heads".into()), 0.5);
}

#[test]
fn test_unnormalized_weights_probability() {
    let coin = distribution! { Heads = 9, Tails = 1 }.unwrap();
    assert_eq!(coin.probability(&"Heads".into()), 0.9);
}

// ============================================================================
// 3. Join of a coin and a die
// ============================================================================

#[test]
fn test_join_coin_and_die() {
    let game = join(&[&uniform(["H", "T"]), &d6()]);
    assert_eq!(game.len(), 12);
    for (_, weight) in game.iter() {
        assert_close(*weight, 1.0 / 12.0, 1e-15);
    }
    assert_eq!(game.pairs()[0].0, Value::from(("H", 1)));
    assert_eq!(game.pairs()[11].0, Value::from(("T", 6)));
}

// ============================================================================
// 4. Power then filter keeps only the mixed outcomes
// ============================================================================

#[test]
fn test_power_filter_not_equal() {
    let flips = uniform(["H", "T"]).power(2).filter(helpers::ne).unwrap();
    assert_eq!(
        flips.pairs(),
        &[
            (Value::from(("H", "H")), 0.0),
            (Value::from(("H", "T")), 0.25),
            (Value::from(("T", "H")), 0.25),
            (Value::from(("T", "T")), 0.0),
        ]
    );
}

// ============================================================================
// 5. Nested distribution with REST
// ============================================================================

#[test]
fn test_nested_with_rest() {
    let d = Distribution::new(vec![
        (uniform([1, 5, 10]).into(), Odds::from(0.99)),
        ("X".into(), REST),
    ])
    .unwrap();
    assert_eq!(d.len(), 4);
    for value in [1, 5, 10] {
        assert_close(d.weight(&value.into()).unwrap(), 0.33, 1e-12);
    }
    assert_close(d.weight(&"X".into()).unwrap(), 0.01, 1e-12);
    assert_close(d.total(), 1.0, 1e-12);
}

// ============================================================================
// 6. Quantity addition
// ============================================================================

#[test]
fn test_solution_addition() {
    let juice = Solution::new([("water", 200), ("orange", 600)]).unwrap();
    let sugar_water = Solution::new([("water", 95), ("sugar", 5)]).unwrap();
    let mix = (&juice + &(&sugar_water / 2.0).unwrap()).unwrap();
    assert_eq!(
        mix.pairs(),
        &[
            (Value::from("water"), 247.5),
            (Value::from("orange"), 600.0),
            (Value::from("sugar"), 2.5),
        ]
    );
}

// ============================================================================
// Medical test (Bayes update through filter)
// ============================================================================

#[test]
fn test_mammogram_update() {
    let population = distribution! { Cancer = 0.01, NoCancer = REST }.unwrap();
    let positive = population
        .filter_with(Spec::lookup([("Cancer", 0.8), ("NoCancer", 0.096)]))
        .unwrap();
    assert_close(positive.probability(&"Cancer".into()), 0.07764, 1e-5);
}

#[test]
fn test_mammogram_outcomes_modelled_as_nested() {
    let cancer = distribution! { "True positive" => 0.8, "False negative" => REST }.unwrap();
    let healthy = distribution! { "False positive" => 0.096, "True negative" => REST }.unwrap();
    let outcomes = Distribution::new(vec![(cancer.into(), Odds::from(0.01)), (healthy.into(), REST)]).unwrap();
    let positive = outcomes
        .filter_with(Spec::members(["True positive", "False positive"]))
        .unwrap();
    assert_close(positive.probability(&"True positive".into()), 0.07764, 1e-5);
    assert_eq!(positive.probability(&"True negative".into()), 0.0);
}

// ============================================================================
// Bus stop
// ============================================================================

fn bus_stop() -> Distribution {
    let arrivals = uniform([
        "Will arrive at 23:35",
        "Will arrive at 23:40",
        "Will arrive at 23:45",
        "Will arrive at 23:50",
        "Will arrive at 23:55",
        "Will arrive at 00:00",
    ]);
    Distribution::new(vec![(arrivals.into(), Odds::from(0.6)), ("Not operating".into(), REST)]).unwrap()
}

#[test]
fn test_bus_stop_after_five_minutes() {
    let later = bus_stop()
        .filter(|v| !v.as_str().is_some_and(|s| s.contains("23:35")))
        .unwrap();
    assert_close(later.probability(&"Not operating".into()), 4.0 / 9.0, 1e-12);
    assert_close(later.probability(&"Will arrive at 00:00".into()), 1.0 / 9.0, 1e-12);
}

#[test]
fn test_bus_stop_just_before_midnight() {
    let later = bus_stop()
        .filter(|v| !v.as_str().is_some_and(|s| s.contains("23:")))
        .unwrap();
    assert_close(later.probability(&"Not operating".into()), 0.8, 1e-12);
    assert_close(later.probability(&"Will arrive at 00:00".into()), 0.2, 1e-12);
}

// ============================================================================
// Monty Hall
// ============================================================================

fn best_strategy(items: &[Value]) -> &'static str {
    let switched = if items[1] == Value::Int(2) { 3 } else { 2 };
    if items[0] == Value::Int(switched) { "Switching wins" } else { "Staying wins" }
}

#[test]
fn test_monty_hall() {
    let car_positions = uniform([1, 2, 3]);
    let games = car_positions
        .map(|car| match car.as_int() {
            // The host picks either empty door at random.
            Some(1) => Value::from(uniform([(1, 2), (1, 3)])),
            Some(2) => Value::from((2, 3)),
            _ => Value::from((3, 2)),
        })
        .unwrap();
    let outcome = games.starmap(best_strategy).unwrap();
    assert_close(outcome.probability(&"Switching wins".into()), 2.0 / 3.0, 1e-12);
    assert_eq!(outcome.mode(), Some(&Value::from("Switching wins")));
}

#[test]
fn test_monty_hall_ignorant_host() {
    let game = join(&[&uniform([1, 2, 3]), &uniform([2, 3])])
        .filter(helpers::ne)
        .unwrap();
    let outcome = game.starmap(best_strategy).unwrap();
    assert_close(outcome.probability(&"Switching wins".into()), 0.5, 1e-12);
    assert_close(outcome.probability(&"Staying wins".into()), 0.5, 1e-12);
}

// ============================================================================
// Dice games
// ============================================================================

#[test]
fn test_two_dice_difference() {
    let verdict = d6()
        .power(2)
        .map(helpers::difference)
        .unwrap()
        .map(|d| if d.as_int().is_some_and(|d| d <= 2) { "No" } else { "Yes" })
        .unwrap();
    assert_close(verdict.probability(&"No".into()), 2.0 / 3.0, 1e-12);
}

#[test]
fn test_two_dice_any_two_or_five() {
    let verdict = (2usize * &d6())
        .map(|pair| {
            let faces = pair.as_tuple().unwrap_or_default();
            if faces.contains(&Value::Int(2)) || faces.contains(&Value::Int(5)) { "No" } else { "Yes" }
        })
        .unwrap();
    assert_close(verdict.probability(&"No".into()), 20.0 / 36.0, 1e-12);
}

#[test]
fn test_makeshift_d20() {
    let sums = d4().power(5).map(helpers::sum).unwrap();
    assert_eq!(sums.len(), 16);
    assert_eq!(sums.pairs()[0].0, Value::Int(5));
    assert_close(sums.probability(&Value::Int(12)), 155.0 / 1024.0, 1e-12);
    assert_close(sums.probability(&Value::Int(20)), 1.0 / 1024.0, 1e-12);
}

#[test]
fn test_dungeons_and_confused_dragons() {
    let close = join(&[&d20(), &d12(), &d4()])
        .map(|s| {
            let [a, b, d] = s.as_tuple().and_then(|t| <&[Value; 3]>::try_from(t).ok()).cloned().unwrap();
            let gap = (a.as_int().unwrap() - b.as_int().unwrap()).abs();
            gap < d.as_int().unwrap()
        })
        .unwrap();
    assert_close(close.probability(&true.into()), 0.189583, 1e-6);
}

#[test]
fn test_nontransitive_dice() {
    let a = uniform([2, 2, 4, 4, 9, 9]);
    let b = uniform([1, 1, 6, 6, 8, 8]);
    let c = uniform([3, 3, 5, 5, 7, 7]);
    for die in [&a, &b, &c] {
        assert_close(die.expected_value().unwrap(), 5.0, 1e-12);
    }

    let duels = [(&a, &b, "A wins", "B wins"), (&b, &c, "B wins", "C wins"), (&c, &a, "C wins", "A wins")];
    for (first, second, win, lose) in duels {
        let result = join(&[first, second])
            .map(helpers::gt)
            .unwrap()
            .map_with(Spec::lookup([(true, win), (false, lose)]))
            .unwrap();
        assert_close(result.probability(&win.into()), 5.0 / 9.0, 1e-12);
    }
}

// ============================================================================
// Daughters
// ============================================================================

#[test]
fn test_daughters() {
    let children = uniform(["Son", "Daughter"]).power(2);
    let daughter = Value::from("Daughter");

    let at_least_one = children
        .filter(|s| s.as_tuple().is_some_and(|t| t.contains(&daughter)))
        .unwrap()
        .map(helpers::eq)
        .unwrap();
    assert_close(at_least_one.probability(&true.into()), 1.0 / 3.0, 1e-12);

    let elder = children.filter(|s| helpers::second(s) == daughter).unwrap().map(helpers::eq).unwrap();
    assert_close(elder.probability(&true.into()), 0.5, 1e-12);
}

// ============================================================================
// Unbiased flip from a biased coin
// ============================================================================

#[test]
fn test_von_neumann_unbiased_coin() {
    let b_coin = distribution! { Heads = 0.6, Tails = REST }.unwrap();
    let fair = b_coin.power(2).filter(helpers::ne).unwrap().map(helpers::first).unwrap();
    assert_close(fair.probability(&"Heads".into()), 0.5, 1e-12);
    assert_eq!(
        fair.plot(&PlotOptions::unsorted()),
        "                        Heads  50.00% [====================                    ]\n\
         \x20                       Tails  50.00% [====================                    ]\n\n"
    );
}

// ============================================================================
// Coin bias detection (distributions as opaque values)
// ============================================================================

#[test]
fn test_detect_coin_bias() {
    let coin_types = (0..=10)
        .map(|i| distribution! { Heads = i as f64 / 10.0, Tails = REST })
        .collect::<odds_rs::Result<Vec<_>>>()
        .unwrap();
    let mut coins = uniform_with(coin_types.clone(), BuildOptions::preserve_nested());
    assert_eq!(coins.len(), 11);

    let tosses = ["Heads", "Tails", "Heads", "Heads", "Tails", "Heads", "Heads", "Tails", "Heads", "Heads"];
    for toss in tosses {
        let toss = Value::from(toss);
        coins = coins
            .filter(|c| c.as_distribution().and_then(|d| d.weight(&toss)).unwrap_or(0.0))
            .unwrap()
            .normalize()
            .unwrap();
    }

    assert_eq!(coins.len(), 11);
    let seventy = Value::from(coin_types[7].clone());
    assert_eq!(coins.mode(), Some(&seventy));
    assert_close(coins.probability(&seventy), 0.2932, 1e-4);
    assert_eq!(coins.probability(&coin_types[0].clone().into()), 0.0);
}

// ============================================================================
// Sleeping beauty
// ============================================================================

#[test]
fn test_sleeping_beauty() {
    let days = join(&[&coin(), &uniform(["Monday", "Tuesday"])]);
    let guesses = days
        .map(|state| {
            if *state == Value::from(("Heads", "Tuesday")) {
                // Not awakened.
                return Value::from(Distribution::empty());
            }
            let with_guess = |guess: &str| {
                let mut items = state.as_tuple().unwrap_or_default().to_vec();
                items.push(guess.into());
                Value::Tuple(items)
            };
            uniform([with_guess("Heads"), with_guess("Tails")]).into()
        })
        .unwrap();
    assert_eq!(guesses.len(), 6);
    for (_, p) in guesses.probabilities() {
        assert_close(p, 1.0 / 6.0, 1e-12);
    }

    let verdict = guesses
        .starmap(|s| if s[0] == s[2] { format!("Correct {}", s[2]) } else { "Incorrect".to_string() })
        .unwrap();
    assert_close(verdict.probability(&"Incorrect".into()), 0.5, 1e-12);
    assert_close(verdict.probability(&"Correct Tails".into()), 1.0 / 3.0, 1e-12);
    assert_close(verdict.probability(&"Correct Heads".into()), 1.0 / 6.0, 1e-12);
}

// ============================================================================
// Mixing solutions
// ============================================================================

#[test]
fn test_mixing_solutions() {
    let juice = Solution::new([("water", 200), ("orange", 600)]).unwrap();
    let sugar_water = Solution::new([("water", 95), ("sugar", 5)]).unwrap();
    let mix = (&juice + &(&sugar_water / 2.0).unwrap()).unwrap();

    let filtered = mix
        .filter_with(Spec::lookup([("water", 1.0), ("orange", 0.01), ("sugar", 0.80)]))
        .unwrap();
    assert_close(filtered.volume(), 255.5, 1e-9);
    assert_close(filtered.probability(&"water".into()), 0.9687, 1e-4);

    let half_and_half = Solution::mix([(juice, 1.0), (sugar_water, 1.0)]).unwrap();
    assert_close(half_and_half.probability(&"water".into()), 0.60, 1e-12);
    assert_close(half_and_half.probability(&"orange".into()), 0.375, 1e-12);
    assert_close(half_and_half.probability(&"sugar".into()), 0.025, 1e-12);
}
