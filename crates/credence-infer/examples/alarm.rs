use credence_core::Evidence;
use credence_infer::{exact, gibbs, impute, sample, Algorithm, GibbsConfig};
use credence_net::{canonical_hash, prepare, ConditionalTable, NetworkStructure, TableStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let structure = NetworkStructure::from_edges([
        ("Burglary", "Alarm"),
        ("Earthquake", "Alarm"),
        ("Alarm", "JohnCalls"),
        ("Alarm", "MaryCalls"),
    ])?;

    let mut store = TableStore::new();
    store.set(ConditionalTable::new("Burglary").with_root_row([(true, 0.001), (false, 0.999)]));
    store.set(ConditionalTable::new("Earthquake").with_root_row([(true, 0.002), (false, 0.998)]));
    store.set(
        ConditionalTable::new("Alarm")
            .with_row(
                [("Burglary", true), ("Earthquake", true)],
                [(true, 0.95), (false, 0.05)],
            )
            .with_row(
                [("Burglary", true), ("Earthquake", false)],
                [(true, 0.94), (false, 0.06)],
            )
            .with_row(
                [("Burglary", false), ("Earthquake", true)],
                [(true, 0.29), (false, 0.71)],
            )
            .with_row(
                [("Burglary", false), ("Earthquake", false)],
                [(true, 0.001), (false, 0.999)],
            ),
    );
    store.set(
        ConditionalTable::new("JohnCalls")
            .with_row([("Alarm", true)], [(true, 0.90), (false, 0.10)])
            .with_row([("Alarm", false)], [(true, 0.05), (false, 0.95)]),
    );
    store.set(
        ConditionalTable::new("MaryCalls")
            .with_row([("Alarm", true)], [(true, 0.70), (false, 0.30)])
            .with_row([("Alarm", false)], [(true, 0.01), (false, 0.99)]),
    );

    let net = prepare(&structure, &store)?;
    println!("prepared {} variables, hash {}", net.variable_count(), canonical_hash(&net));

    let evidence = Evidence::new()
        .observe("JohnCalls", true)
        .observe("MaryCalls", true);

    let posterior = exact::query(&net, "Burglary", &evidence)?;
    println!("exact P(Burglary | both call):");
    for (value, probability) in posterior.iter() {
        println!("  {value} -> {probability:.6}");
    }

    let summary = gibbs::run(&GibbsConfig::default(), &net, "Burglary", &evidence)?;
    println!("gibbs P(Burglary | both call) over {} chains:", summary.chains);
    for (value, probability) in summary.distribution.iter() {
        println!("  {value} -> {probability:.6}");
    }

    println!("three forward draws:");
    for assignment in sample(&net, 3, 7) {
        let line: Vec<String> = assignment
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        println!("  {}", line.join(" "));
    }

    let filled = impute(&net, &evidence, &Algorithm::Exact)?;
    println!("most probable completion of the evidence:");
    for (name, value) in filled.iter() {
        println!("  {name}={value}");
    }

    Ok(())
}
