use anyhow::{bail, Result};
use clap::Parser;
use log::{info, warn};

use contract_scout::{
    analyzer,
    chain::NodeProxyFactory,
    classifier::{Outcome, UsabilityClassifier},
    cli::{Cli, InspectMode, Mode},
    config::Config,
    explorer::ExplorerClient,
    listing::{VerifiedContractIndex, DEFAULT_LISTING_URL, DEFAULT_PAGES, DEFAULT_PAGE_SIZE},
    logger::setup_logger,
    output::{CsvSink, ResultSink, StdoutSink},
    throttle::{RequestPacer, EXPLORER_MIN_INTERVAL},
    types::ContractRef,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    setup_logger()?;

    let cli = Cli::parse();
    let mode = cli.mode.mode();
    if !cli.contracts.is_empty() && mode.is_none() {
        bail!("--contract requires one of -s, -a, -d, -f, -u");
    }

    let config = Config::resolve(cli.api_key.as_deref())?;

    let contracts = gather_contracts(&cli).await;
    if contracts.is_empty() {
        warn!("no contracts to process");
        return Ok(());
    }

    match mode {
        Some(Mode::Usable) => run_usable(&config, &cli, &contracts).await,
        Some(Mode::Inspect(inspect)) => run_inspect(&config, &cli, &contracts, Some(inspect)).await,
        None => run_inspect(&config, &cli, &contracts, None).await,
    }
}

/// Either the explicit address list from the CLI or the verified-contracts
/// listing, collected up front. A listing page that fails to parse is
/// reported and skipped; the rest of the run continues.
async fn gather_contracts(cli: &Cli) -> Vec<ContractRef> {
    if !cli.contracts.is_empty() {
        info!("args contain contracts, setting contract addresses");
        return cli
            .contracts
            .iter()
            .map(|address| ContractRef::from_address(address.as_str()))
            .collect();
    }

    info!("no contract addresses specified, retrieving verified contracts");
    let mut index =
        VerifiedContractIndex::new(DEFAULT_LISTING_URL, DEFAULT_PAGES, DEFAULT_PAGE_SIZE);
    let mut contracts = Vec::new();
    loop {
        match index.next().await {
            Ok(Some(contract)) => contracts.push(contract),
            Ok(None) => break,
            Err(e) => warn!("skipping listing page: {}", e),
        }
    }
    info!("finished retrieving verified contracts ({})", contracts.len());
    contracts
}

/// Modes s/a/d/f plus the bare listing: fetch details per contract and print
/// the requested projection.
async fn run_inspect(
    config: &Config,
    cli: &Cli,
    contracts: &[ContractRef],
    mode: Option<InspectMode>,
) -> Result<()> {
    let explorer = ExplorerClient::new(
        config.explorer_url.as_str(),
        config.explorer_api_key.as_str(),
    );
    let mut pacer = RequestPacer::new(EXPLORER_MIN_INTERVAL);

    for contract in contracts {
        pacer.pace().await;
        let details = match explorer.get_details(&contract.address).await {
            Ok(details) => details,
            Err(e) => {
                warn!("skipping {}: {}", contract.address, e);
                continue;
            }
        };

        if let Some(query) = &cli.query {
            if !analyzer::contains_string(&details.source_code, query) {
                continue;
            }
            info!("FOUND: string '{}'", query);
        }

        println!(
            "\nADDRESS {} (NAME: {})\n",
            contract.address,
            contract.display_name()
        );
        match mode {
            Some(InspectMode::Source) => println!("{}\n", details.source_code),
            Some(InspectMode::Abi) => println!("{}\n", details.abi),
            Some(InspectMode::Description) => {
                println!("{}\n", analyzer::extract_description(&details.source_code))
            }
            Some(InspectMode::Functions) => {
                for function in analyzer::extract_function_signatures(&details.source_code) {
                    println!("{}", function);
                }
                println!();
            }
            None => {}
        }
    }
    Ok(())
}

/// Mode u: run the usability classifier over every contract and hand the
/// emitted records to the configured sink.
async fn run_usable(config: &Config, cli: &Cli, contracts: &[ContractRef]) -> Result<()> {
    let explorer = ExplorerClient::new(
        config.explorer_url.as_str(),
        config.explorer_api_key.as_str(),
    );
    let factory = NodeProxyFactory::new(
        config.node_endpoint.as_str(),
        config.node_api_key.as_str(),
    );
    let mut classifier =
        UsabilityClassifier::new(explorer, factory).with_query(cli.query.clone());

    let mut sink: Box<dyn ResultSink> = match &cli.output {
        Some(path) => {
            info!("output will be written to {}", path.display());
            Box::new(CsvSink::create(path)?)
        }
        None => Box::new(StdoutSink),
    };

    for contract in contracts {
        info!("getting info for {}", contract.address);
        match classifier.classify(contract).await {
            Ok(Outcome::Usable(result)) => {
                info!("writing {} to output", result.name);
                sink.write(&result)?;
            }
            Ok(Outcome::Skipped(reason)) => {
                info!("{}: skipped, {}", contract.address, reason)
            }
            Err(e) => warn!("{}: skipped, {}", contract.address, e),
        }
    }

    sink.close()?;
    Ok(())
}
