// FF&E sheet CSV export

use std::io::Write;
use std::path::Path;

use atelier_core::{Item, Room, Sheet};
use atelier_engine::{group_sheet, SheetFilter};

/// Fixed column set; one row per item. The `csv` crate handles quoting and
/// doubles embedded quotes, numbers stay unquoted.
pub const FFE_CSV_COLUMNS: [&str; 20] = [
    "Room",
    "Category",
    "Sub-Category",
    "Item Name",
    "Vendor/SKU",
    "Quantity",
    "Size",
    "Status",
    "Finish/Color",
    "Actual Cost",
    "Image Link",
    "Link",
    "Estimated Ship Date",
    "Estimated Delivery Date",
    "Install Date",
    "Shipping To",
    "Tracking Number",
    "Carrier",
    "Order Date",
    "Remarks",
];

/// Export the FF&E sheet (every non-Walkthrough item) to CSV, rows in
/// grouped traversal order. Two runs over the same data produce
/// byte-identical output.
pub fn export_ffe<W: Write>(rooms: &[Room], items: &[Item], writer: W) -> Result<(), String> {
    let ffe_items: Vec<Item> = items
        .iter()
        .filter(|i| Sheet::Ffe.contains(i.status))
        .cloned()
        .collect();
    let tree = group_sheet(rooms, &ffe_items, &SheetFilter::all());

    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    // Always write the header, even with zero rows
    csv_writer
        .write_record(FFE_CSV_COLUMNS)
        .map_err(|e| e.to_string())?;

    for room_group in &tree.rooms {
        for category in &room_group.categories {
            for sub in &category.sub_categories {
                for item in &sub.items {
                    csv_writer
                        .write_record(item_row(&room_group.room.name, item))
                        .map_err(|e| e.to_string())?;
                }
            }
        }
    }

    csv_writer.flush().map_err(|e| e.to_string())?;
    Ok(())
}

pub fn export_ffe_to_path(rooms: &[Room], items: &[Item], path: &Path) -> Result<(), String> {
    let file = std::fs::File::create(path).map_err(|e| e.to_string())?;
    export_ffe(rooms, items, std::io::BufWriter::new(file))
}

/// Download name: `{project-name-kebab-case}-ffe-data.csv`.
pub fn export_filename(project_name: &str) -> String {
    format!("{}-ffe-data.csv", kebab_case(project_name))
}

fn item_row(room_name: &str, item: &Item) -> Vec<String> {
    vec![
        room_name.to_string(),
        item.effective_category().to_string(),
        item.effective_sub_category().to_string(),
        item.name.clone(),
        opt(&item.vendor_sku),
        item.quantity.to_string(),
        opt(&item.size),
        item.status.as_str().to_string(),
        opt(&item.finish_color),
        item.actual_cost.map(format_cost).unwrap_or_default(),
        opt(&item.image_link),
        opt(&item.link),
        opt(&item.estimated_ship_date),
        opt(&item.estimated_delivery_date),
        opt(&item.install_date),
        opt(&item.shipping_to),
        opt(&item.tracking_number),
        opt(&item.carrier),
        opt(&item.order_date),
        opt(&item.remarks),
    ]
}

fn opt(field: &Option<String>) -> String {
    field.clone().unwrap_or_default()
}

/// Shortest plain decimal form: 1299.5 → "1299.5", 450.0 → "450".
fn format_cost(cost: f64) -> String {
    format!("{}", cost)
}

fn kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_dash = false;
    for c in s.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}
