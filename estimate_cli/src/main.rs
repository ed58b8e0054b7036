//! # Tameer CLI Application
//!
//! Terminal front-end for the estimation engine. One subcommand per tool,
//! plus passcode-gated admin commands for editing the rate book and an
//! estimate-document workflow ending in a PDF report.
//!
//! Missing numeric arguments are prompted for interactively with sensible
//! defaults; `--json` switches any calculator to raw JSON output for
//! scripting.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use estimate_core::admin::AdminSession;
use estimate_core::calculators::{
    ac_capacity, area, building, flooring, paint, water_tank, AcCapacityInput, AreaInput,
    BuildingInput, EstimateItem, EstimateMode, FlooringInput, PaintInput, TankShape,
    WaterTankInput,
};
use estimate_core::estimate::Estimate;
use estimate_core::report::render_estimate_pdf;
use estimate_core::resources::{by_category, NewResource, ResourceKind};
use estimate_core::settings::{
    AssumptionsUpdate, BrandingUpdate, LocationFactorsUpdate, LocationTier, PricingUpdate,
    QualityFactorsUpdate, QualityTier, Settings, SettingsUpdate,
};
use estimate_core::store::{
    load_estimate, load_settings_or_default, save_estimate, save_settings, FileLock,
};
use estimate_core::units::{Rupees, SQFT_PER_MARLA};

#[derive(Parser)]
#[command(name = "tameer")]
#[command(about = "Construction cost calculators over an editable rate book")]
#[command(version)]
struct Cli {
    /// Path to the rate book file
    #[arg(long, global = true, default_value = "tameer_rates.tmr", value_name = "FILE")]
    rates: PathBuf,

    /// Emit raw JSON instead of formatted output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Estimate total construction cost for a building
    Build(BuildArgs),
    /// Convert a plot size between area units
    Area(AreaArgs),
    /// Estimate paint quantity and cost for a room
    Paint(PaintArgs),
    /// Check water tank capacity against household demand
    Tank(TankArgs),
    /// Estimate tile count and flooring cost
    Floor(FloorArgs),
    /// Size air conditioning for a room
    Ac(AcArgs),
    /// List the resource library
    Resources {
        /// Only show resources in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Edit the rate book (requires the admin passcode)
    Admin(AdminArgs),
    /// Manage estimate documents (.tme files)
    Estimate(EstimateArgs),
    /// Render an estimate document to a PDF report
    Report {
        /// Estimate document to render
        #[arg(long, value_name = "FILE")]
        estimate: PathBuf,
        /// Output PDF path
        #[arg(long, value_name = "FILE", default_value = "estimate.pdf")]
        out: PathBuf,
    },
}

#[derive(Args)]
struct BuildArgs {
    /// Ground-floor footprint in sqft
    #[arg(long)]
    footprint: Option<f64>,

    /// Plot size in marla (alternative to --footprint)
    #[arg(long, conflicts_with = "footprint")]
    marla: Option<f64>,

    /// Number of floors including the ground floor
    #[arg(long, default_value_t = 1)]
    floors: u32,

    /// Site location: urban, suburban or rural
    #[arg(long, default_value = "suburban")]
    location: String,

    /// Finishing quality: standard, premium or luxury
    #[arg(long, default_value = "standard")]
    quality: String,

    /// Produce the full quantity takeoff instead of the quick figure
    #[arg(long)]
    itemized: bool,

    /// Label for the estimate
    #[arg(long, default_value = "Building")]
    label: String,
}

#[derive(Args)]
struct AreaArgs {
    /// Plot length in feet
    #[arg(long)]
    length: Option<f64>,

    /// Plot width in feet
    #[arg(long)]
    width: Option<f64>,

    /// Direct area in sqft (alternative to dimensions)
    #[arg(long)]
    sqft: Option<f64>,
}

#[derive(Args)]
struct PaintArgs {
    /// Room length in feet
    #[arg(long)]
    length: Option<f64>,

    /// Room width in feet
    #[arg(long)]
    width: Option<f64>,

    /// Wall height in feet
    #[arg(long)]
    height: Option<f64>,

    /// Door openings to deduct
    #[arg(long, default_value_t = 1)]
    doors: u32,

    /// Window openings to deduct
    #[arg(long, default_value_t = 1)]
    windows: u32,

    /// Paint the ceiling too
    #[arg(long)]
    ceiling: bool,

    /// Number of coats
    #[arg(long, default_value_t = 2)]
    coats: u32,

    /// Coverage override in sqft per liter per coat
    #[arg(long)]
    coverage: Option<f64>,
}

#[derive(Args)]
struct TankArgs {
    /// Tank length in feet (rectangular)
    #[arg(long)]
    length: Option<f64>,

    /// Tank width in feet (rectangular)
    #[arg(long)]
    width: Option<f64>,

    /// Tank depth in feet (rectangular)
    #[arg(long)]
    depth: Option<f64>,

    /// Tank diameter in feet (cylindrical; replaces length/width)
    #[arg(long, conflicts_with_all = ["length", "width"])]
    diameter: Option<f64>,

    /// Tank height in feet (cylindrical)
    #[arg(long, requires = "diameter")]
    height: Option<f64>,

    /// People served by the tank
    #[arg(long, default_value_t = 6)]
    household: u32,

    /// Demand override in liters per person per day
    #[arg(long)]
    demand: Option<f64>,
}

#[derive(Args)]
struct FloorArgs {
    /// Floor area in sqft
    #[arg(long)]
    area: Option<f64>,

    /// Tile length in inches
    #[arg(long, default_value_t = 24.0)]
    tile_length: f64,

    /// Tile width in inches
    #[arg(long, default_value_t = 24.0)]
    tile_width: f64,

    /// Wastage allowance in percent
    #[arg(long, default_value_t = 10.0)]
    wastage: f64,
}

#[derive(Args)]
struct AcArgs {
    /// Room floor area in sqft
    #[arg(long)]
    area: Option<f64>,

    /// Regular occupants
    #[arg(long, default_value_t = 2)]
    occupants: u32,

    /// Strong afternoon sun or top floor
    #[arg(long)]
    sunny: bool,

    /// Kitchen or open kitchen
    #[arg(long)]
    kitchen: bool,
}

#[derive(Args)]
struct AdminArgs {
    /// Admin passcode from the rate book
    #[arg(long, value_name = "PASSCODE")]
    passcode: String,

    #[command(subcommand)]
    action: AdminAction,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Print the current rate book
    Show,
    /// Update per-unit prices
    Prices {
        #[arg(long)]
        base: Option<f64>,
        #[arg(long)]
        labor: Option<f64>,
        #[arg(long)]
        brick: Option<f64>,
        #[arg(long)]
        cement: Option<f64>,
        #[arg(long)]
        steel: Option<f64>,
        #[arg(long)]
        sand: Option<f64>,
        #[arg(long)]
        paint: Option<f64>,
        #[arg(long)]
        tile: Option<f64>,
    },
    /// Update multipliers and the foundation rate
    Factors {
        #[arg(long)]
        urban: Option<f64>,
        #[arg(long)]
        suburban: Option<f64>,
        #[arg(long)]
        rural: Option<f64>,
        #[arg(long)]
        standard: Option<f64>,
        #[arg(long)]
        premium: Option<f64>,
        #[arg(long)]
        luxury: Option<f64>,
        #[arg(long)]
        foundation: Option<f64>,
    },
    /// Update branding shown on reports
    Branding {
        #[arg(long)]
        site_name: Option<String>,
        #[arg(long)]
        brand_color: Option<String>,
        #[arg(long)]
        logo_url: Option<String>,
        #[arg(long)]
        report_header: Option<String>,
    },
    /// Manage the resource library
    Resource {
        #[command(subcommand)]
        action: ResourceAction,
    },
    /// Change the admin passcode
    Passcode {
        #[arg(long, value_name = "PASSCODE")]
        new: String,
    },
}

#[derive(Subcommand)]
enum ResourceAction {
    /// Add a resource (title and url are required)
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "General")]
        category: String,
        #[arg(long)]
        url: String,
        /// pdf or link
        #[arg(long, default_value = "pdf")]
        kind: String,
    },
    /// Remove a resource by id
    Remove {
        #[arg(long)]
        id: Uuid,
    },
}

#[derive(Args)]
struct EstimateArgs {
    /// Estimate document path
    #[arg(long, value_name = "FILE")]
    file: PathBuf,

    #[command(subcommand)]
    action: EstimateAction,
}

#[derive(Subcommand)]
enum EstimateAction {
    /// Create a new estimate document
    New {
        #[arg(long, default_value = "")]
        prepared_by: String,
        #[arg(long, default_value = "")]
        client: String,
        #[arg(long, default_value = "")]
        site: String,
    },
    /// Add a calculator item from its JSON form
    Add {
        /// Item as JSON, e.g. '{"type":"Building","label":...}'
        #[arg(long, value_name = "JSON")]
        item: String,
    },
    /// List the items in the document
    List,
    /// Remove an item by id
    Remove {
        #[arg(long)]
        id: Uuid,
    },
    /// Evaluate every item and print the costed total
    Total,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_settings_or_default(&cli.rates)
        .with_context(|| format!("failed to load rate book {}", cli.rates.display()))?;

    match cli.command {
        Command::Build(args) => run_build(args, &settings, cli.json),
        Command::Area(args) => run_area(args, cli.json),
        Command::Paint(args) => run_paint(args, &settings, cli.json),
        Command::Tank(args) => run_tank(args, cli.json),
        Command::Floor(args) => run_floor(args, &settings, cli.json),
        Command::Ac(args) => run_ac(args, cli.json),
        Command::Resources { category } => run_resources(&settings, category.as_deref(), cli.json),
        Command::Admin(args) => run_admin(args, settings, &cli.rates),
        Command::Estimate(args) => run_estimate(args, &settings, cli.json),
        Command::Report { estimate, out } => run_report(&estimate, &out, &settings),
    }
}

// ============================================================================
// Calculator commands
// ============================================================================

fn run_build(args: BuildArgs, settings: &Settings, json: bool) -> anyhow::Result<()> {
    let footprint_sqft = match (args.footprint, args.marla) {
        (Some(sqft), _) => sqft,
        (None, Some(marla)) => marla * SQFT_PER_MARLA,
        (None, None) => prompt_f64("Enter footprint (sqft) [1125.0]: ", 1125.0),
    };

    let input = BuildingInput {
        label: args.label,
        footprint_sqft,
        floors: args.floors,
        location: LocationTier::from_str_flexible(&args.location)?,
        quality: QualityTier::from_str_flexible(&args.quality)?,
        mode: if args.itemized {
            EstimateMode::Itemized
        } else {
            EstimateMode::Quick
        },
    };

    let result = building::calculate(&input, settings)?;
    if json {
        return print_json(&result);
    }

    banner("BUILDING COST ESTIMATE");
    println!("Input:");
    println!("  Footprint: {:.0} sqft x {} floor(s)", input.footprint_sqft, input.floors);
    println!("  Location:  {} (x{:.2})", input.location, result.location_factor);
    println!("  Quality:   {} (x{:.2})", input.quality, result.quality_factor);
    println!();

    if let Some(b) = &result.breakdown {
        println!("Quantity takeoff ({:.0} sqft covered):", result.covered_area_sqft);
        println!("  Bricks:     {:>12.0}  {}", b.bricks_qty, Rupees(b.bricks_cost_pkr));
        println!("  Cement:     {:>9.0} bags {}", b.cement_bags, Rupees(b.cement_cost_pkr));
        println!("  Steel:      {:>9.2} tons {}", b.steel_tons, Rupees(b.steel_cost_pkr));
        println!("  Sand:       {:>10.0} cft {}", b.sand_cft, Rupees(b.sand_cost_pkr));
        println!("  Materials:  {}", Rupees(b.materials_cost_pkr));
        println!("  Labor:      {:.0} crew-days, {}", b.labor_days, Rupees(b.labor_cost_pkr));
        println!("  Foundation: {}", Rupees(b.foundation_cost_pkr));
        println!("  Subtotal:   {}", Rupees(b.subtotal_pkr));
        println!();
    }

    println!("Effective rate: {} / sqft", Rupees(result.effective_rate_per_sqft));
    rule();
    println!("  TOTAL: {}", Rupees(result.total_cost_pkr));
    rule();
    Ok(())
}

fn run_area(args: AreaArgs, json: bool) -> anyhow::Result<()> {
    let input = if args.length.is_none() && args.width.is_none() && args.sqft.is_none() {
        AreaInput {
            label: "Plot".to_string(),
            length_ft: Some(prompt_f64("Enter length (ft) [30.0]: ", 30.0)),
            width_ft: Some(prompt_f64("Enter width (ft) [60.0]: ", 60.0)),
            area_sqft: None,
        }
    } else {
        AreaInput {
            label: "Plot".to_string(),
            length_ft: args.length,
            width_ft: args.width,
            area_sqft: args.sqft,
        }
    };

    let result = area::calculate(&input)?;
    if json {
        return print_json(&result);
    }

    banner("PLOT AREA");
    println!("  Square feet:   {:>12.2}", result.sqft);
    println!("  Square yards:  {:>12.2}", result.sqyd);
    println!("  Marla:         {:>12.2}", result.marla);
    println!("  Kanal:         {:>12.3}", result.kanal);
    println!("  Square meters: {:>12.2}", result.sqm);
    println!("  Acres:         {:>12.4}", result.acre);
    Ok(())
}

fn run_paint(args: PaintArgs, settings: &Settings, json: bool) -> anyhow::Result<()> {
    let input = PaintInput {
        label: "Room".to_string(),
        length_ft: args
            .length
            .unwrap_or_else(|| prompt_f64("Enter room length (ft) [16.0]: ", 16.0)),
        width_ft: args
            .width
            .unwrap_or_else(|| prompt_f64("Enter room width (ft) [12.0]: ", 12.0)),
        height_ft: args
            .height
            .unwrap_or_else(|| prompt_f64("Enter wall height (ft) [10.0]: ", 10.0)),
        doors: args.doors,
        windows: args.windows,
        include_ceiling: args.ceiling,
        coats: args.coats,
        coverage_sqft_per_liter: args.coverage,
    };

    let result = paint::calculate(&input, settings)?;
    if json {
        return print_json(&result);
    }

    banner("PAINT ESTIMATE");
    println!("  Wall area:      {:.0} sqft", result.wall_area_sqft);
    println!("  Deductions:     {:.0} sqft", result.deduction_sqft);
    println!("  Paintable area: {:.0} sqft", result.paintable_area_sqft);
    println!("  Coats:          {}", result.coats);
    println!("  Coverage:       {:.0} sqft/liter", result.coverage_sqft_per_liter);
    rule();
    println!("  Paint required: {:.1} liters", result.liters_required);
    println!("  Paint cost:     {}", Rupees(result.paint_cost_pkr));
    rule();
    Ok(())
}

fn run_tank(args: TankArgs, json: bool) -> anyhow::Result<()> {
    let shape = if let Some(diameter) = args.diameter {
        TankShape::Cylindrical {
            diameter_ft: diameter,
            height_ft: args
                .height
                .unwrap_or_else(|| prompt_f64("Enter tank height (ft) [5.0]: ", 5.0)),
        }
    } else {
        TankShape::Rectangular {
            length_ft: args
                .length
                .unwrap_or_else(|| prompt_f64("Enter tank length (ft) [6.0]: ", 6.0)),
            width_ft: args
                .width
                .unwrap_or_else(|| prompt_f64("Enter tank width (ft) [4.0]: ", 4.0)),
            depth_ft: args
                .depth
                .unwrap_or_else(|| prompt_f64("Enter tank depth (ft) [4.0]: ", 4.0)),
        }
    };

    let input = WaterTankInput {
        label: "Tank".to_string(),
        shape,
        household_size: args.household,
        daily_demand_liters_per_person: args.demand,
    };

    let result = water_tank::calculate(&input)?;
    if json {
        return print_json(&result);
    }

    banner("WATER TANK CAPACITY");
    println!("  Volume:     {:.1} cft", result.volume_cft);
    println!("  Capacity:   {:.0} liters ({:.0} gallons)", result.capacity_liters, result.capacity_gallons);
    println!("  Demand:     {:.0} liters/day for {} people", result.daily_demand_liters, input.household_size);
    println!("  Storage:    {:.1} days", result.days_of_storage);
    rule();
    println!(
        "  RESULT: {}",
        if result.meets_recommendation {
            "Adequate for the household".to_string()
        } else {
            format!(
                "Undersized - {:.0} liters recommended",
                result.recommended_liters
            )
        }
    );
    rule();
    Ok(())
}

fn run_floor(args: FloorArgs, settings: &Settings, json: bool) -> anyhow::Result<()> {
    let input = FlooringInput {
        label: "Floor".to_string(),
        area_sqft: args
            .area
            .unwrap_or_else(|| prompt_f64("Enter floor area (sqft) [400.0]: ", 400.0)),
        tile_length_in: args.tile_length,
        tile_width_in: args.tile_width,
        wastage_pct: args.wastage,
    };

    let result = flooring::calculate(&input, settings)?;
    if json {
        return print_json(&result);
    }

    banner("FLOORING ESTIMATE");
    println!("  Area + wastage: {:.0} sqft", result.area_with_wastage_sqft);
    println!(
        "  Tile size:      {:.0}\" x {:.0}\" ({:.2} sqft)",
        input.tile_length_in, input.tile_width_in, result.tile_area_sqft
    );
    println!("  Tiles required: {}", result.tiles_required);
    println!("  Material cost:  {}", Rupees(result.material_cost_pkr));
    println!(
        "  Labor:          {:.0} crew-days, {}",
        result.labor_days,
        Rupees(result.labor_cost_pkr)
    );
    rule();
    println!("  TOTAL: {}", Rupees(result.total_cost_pkr));
    rule();
    Ok(())
}

fn run_ac(args: AcArgs, json: bool) -> anyhow::Result<()> {
    let input = AcCapacityInput {
        label: "Room".to_string(),
        area_sqft: args
            .area
            .unwrap_or_else(|| prompt_f64("Enter room area (sqft) [220.0]: ", 220.0)),
        occupants: args.occupants,
        sunny: args.sunny,
        kitchen: args.kitchen,
    };

    let result = ac_capacity::calculate(&input)?;
    if json {
        return print_json(&result);
    }

    banner("AC CAPACITY");
    println!("  Cooling load: {:.0} BTU/hr ({:.2} tons)", result.btu_required, result.tons_required);
    rule();
    println!(
        "  RECOMMENDED: {} x {:.2}-ton unit(s)",
        result.unit_count, result.recommended_size_tons
    );
    rule();
    Ok(())
}

fn run_resources(
    settings: &Settings,
    category: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let filtered: Vec<_> = match category {
        Some(category) => by_category(&settings.resources, category)
            .into_iter()
            .cloned()
            .collect(),
        None => settings.resources.clone(),
    };

    if json {
        return print_json(&filtered);
    }

    banner("RESOURCE LIBRARY");
    if filtered.is_empty() {
        println!("  (no resources)");
        return Ok(());
    }
    for resource in &filtered {
        println!("  [{}] {}", resource.kind.display_name(), resource.title);
        if !resource.description.is_empty() {
            println!("      {}", resource.description);
        }
        println!("      Category: {}", resource.category);
        println!("      {}", resource.url);
        println!("      id: {}", resource.id);
        println!();
    }
    Ok(())
}

// ============================================================================
// Admin commands
// ============================================================================

fn run_admin(args: AdminArgs, mut settings: Settings, rates_path: &PathBuf) -> anyhow::Result<()> {
    let session = AdminSession::login(&settings, &args.passcode)?;

    match args.action {
        AdminAction::Show => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
            return Ok(());
        }
        AdminAction::Prices {
            base,
            labor,
            brick,
            cement,
            steel,
            sand,
            paint,
            tile,
        } => {
            session.update_settings(
                &mut settings,
                SettingsUpdate {
                    pricing: Some(PricingUpdate {
                        price_per_sqft: base,
                        labor_cost_per_day: labor,
                        brick_price: brick,
                        cement_price_per_bag: cement,
                        steel_price_per_ton: steel,
                        sand_price_per_cft: sand,
                        paint_price_per_liter: paint,
                        tile_price_per_sqft: tile,
                    }),
                    ..Default::default()
                },
            )?;
            println!("Prices updated.");
        }
        AdminAction::Factors {
            urban,
            suburban,
            rural,
            standard,
            premium,
            luxury,
            foundation,
        } => {
            session.update_settings(
                &mut settings,
                SettingsUpdate {
                    assumptions: Some(AssumptionsUpdate {
                        foundation_cost_per_sqft: foundation,
                        location_factors: Some(LocationFactorsUpdate {
                            urban,
                            suburban,
                            rural,
                        }),
                        quality_factors: Some(QualityFactorsUpdate {
                            standard,
                            premium,
                            luxury,
                        }),
                    }),
                    ..Default::default()
                },
            )?;
            println!("Factors updated.");
        }
        AdminAction::Branding {
            site_name,
            brand_color,
            logo_url,
            report_header,
        } => {
            session.update_settings(
                &mut settings,
                SettingsUpdate {
                    branding: Some(BrandingUpdate {
                        site_name,
                        brand_color,
                        logo_url,
                        report_header,
                    }),
                    ..Default::default()
                },
            )?;
            println!("Branding updated.");
        }
        AdminAction::Resource { action } => match action {
            ResourceAction::Add {
                title,
                description,
                category,
                url,
                kind,
            } => {
                let kind = match kind.to_lowercase().as_str() {
                    "pdf" => ResourceKind::Pdf,
                    "link" => ResourceKind::Link,
                    other => anyhow::bail!("unknown resource kind '{}' (use pdf or link)", other),
                };
                let id = session.add_resource(
                    &mut settings,
                    NewResource {
                        title,
                        description,
                        category,
                        url,
                        kind,
                    },
                )?;
                println!("Resource added with id {}.", id);
            }
            ResourceAction::Remove { id } => {
                let removed = session.remove_resource(&mut settings, id)?;
                println!("Removed resource '{}'.", removed.title);
            }
        },
        AdminAction::Passcode { new } => {
            session.set_passcode(&mut settings, &new)?;
            println!("Passcode changed.");
        }
    }

    // Lock the rate book while writing; other estimators may share it
    let lock = FileLock::acquire(rates_path, current_user())?;
    save_settings(&settings, rates_path)?;
    drop(lock);
    println!("Saved {}.", rates_path.display());
    Ok(())
}

// ============================================================================
// Estimate document commands
// ============================================================================

fn run_estimate(args: EstimateArgs, settings: &Settings, json: bool) -> anyhow::Result<()> {
    match args.action {
        EstimateAction::New {
            prepared_by,
            client,
            site,
        } => {
            let estimate = Estimate::new(prepared_by, client, site);
            save_estimate(&estimate, &args.file)?;
            println!("Created {}.", args.file.display());
        }
        EstimateAction::Add { item } => {
            let item: EstimateItem = serde_json::from_str(&item)
                .context("item is not a valid calculator JSON object")?;
            let mut estimate = load_estimate(&args.file)?;
            let id = estimate.add_item(item);
            save_estimate(&estimate, &args.file)?;
            println!("Added item {}.", id);
        }
        EstimateAction::List => {
            let estimate = load_estimate(&args.file)?;
            if json {
                return print_json(&estimate);
            }
            banner("ESTIMATE ITEMS");
            println!("  Client: {}  Site: {}", estimate.meta.client, estimate.meta.site);
            println!();
            for (id, item) in &estimate.items {
                println!("  {} [{}] {}", id, item.calc_type(), item.label());
            }
            println!();
            println!("  {} item(s)", estimate.item_count());
        }
        EstimateAction::Remove { id } => {
            let mut estimate = load_estimate(&args.file)?;
            match estimate.remove_item(&id) {
                Some(item) => {
                    save_estimate(&estimate, &args.file)?;
                    println!("Removed '{}'.", item.label());
                }
                None => anyhow::bail!("no item with id {}", id),
            }
        }
        EstimateAction::Total => {
            let estimate = load_estimate(&args.file)?;
            let summary = estimate.evaluate_all(settings)?;
            if json {
                return print_json(&summary);
            }
            banner("ESTIMATE TOTAL");
            for line in &summary.lines {
                let cost = match line.output.cost_pkr() {
                    Some(cost) => Rupees(cost).formatted(),
                    None => "-".to_string(),
                };
                println!("  {:<24} {:<12} {}", line.label, line.calc_type, cost);
            }
            rule();
            println!("  TOTAL: {}", Rupees(summary.total_cost_pkr));
            rule();
        }
    }
    Ok(())
}

fn run_report(estimate_path: &PathBuf, out: &PathBuf, settings: &Settings) -> anyhow::Result<()> {
    let estimate = load_estimate(estimate_path)?;
    let pdf_bytes = render_estimate_pdf(&estimate, settings)?;
    std::fs::write(out, &pdf_bytes)
        .with_context(|| format!("failed to write {}", out.display()))?;
    println!(
        "Wrote {} ({} KB) for {}.",
        out.display(),
        pdf_bytes.len() / 1024,
        estimate.meta.client
    );
    Ok(())
}

// ============================================================================
// Terminal helpers
// ============================================================================

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn banner(title: &str) {
    rule();
    println!("  {}", title);
    rule();
    println!();
}

fn rule() {
    println!("═══════════════════════════════════════");
}

fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "estimator".to_string())
}
