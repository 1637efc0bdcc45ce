//! Workbook export. Writes the collected facts and the exclusion
//! recommendations to an Excel workbook, one sheet per fact family plus the
//! recommendations and the hosts that failed collection.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::classify::{Classification, ExclusionRecord};
use crate::collector::HostFacts;
use crate::facts::LldpNeighbor;

/// One LLDP neighbor with the resolved vendor of its chassis id.
#[derive(Debug)]
pub struct LldpRow {
    pub neighbor: LldpNeighbor,
    pub remote_vendor: String,
}

/// Everything one healthy host contributes to the workbook.
#[derive(Debug)]
pub struct HostReport {
    pub facts: HostFacts,
    pub lldp_rows: Vec<LldpRow>,
    pub classification: Classification,
}

/// A host dropped from the run, for the failure sheet.
#[derive(Debug)]
pub struct HostFailure {
    pub host: String,
    pub hostname: String,
    pub error: String,
}

/// Write the whole workbook. Any persistence failure here is terminal for the
/// run; everything upstream was best-effort per host.
pub fn write_workbook(
    path: &Path,
    reports: &[HostReport],
    failures: &[HostFailure],
) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    write_facts_sheet(&mut workbook, &header, reports)?;
    write_interfaces_sheet(&mut workbook, &header, reports)?;
    write_mac_table_sheet(&mut workbook, &header, reports)?;
    write_lldp_sheet(&mut workbook, &header, reports)?;
    write_multi_mac_sheet(&mut workbook, &header, reports)?;
    write_exclusions_sheet(&mut workbook, &header, reports)?;
    write_failures_sheet(&mut workbook, &header, failures)?;

    workbook.save(path)
}

fn new_sheet<'a>(
    workbook: &'a mut Workbook,
    name: &str,
    headers: &[&str],
    header_format: &Format,
) -> Result<&'a mut Worksheet, XlsxError> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(name)?;
    for (col, title) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, header_format)?;
    }
    Ok(worksheet)
}

fn write_facts_sheet(
    workbook: &mut Workbook,
    header: &Format,
    reports: &[HostReport],
) -> Result<(), XlsxError> {
    let headers = [
        "Switch Hostname",
        "Vendor",
        "Model",
        "OS Version",
        "Serial Number",
        "Uptime",
    ];
    let worksheet = new_sheet(workbook, "Facts", &headers, header)?;
    for (idx, report) in reports.iter().enumerate() {
        let row = (idx + 1) as u32;
        let facts = &report.facts.facts;
        worksheet.write_string(row, 0, &report.facts.host)?;
        worksheet.write_string(row, 1, &facts.vendor)?;
        worksheet.write_string(row, 2, &facts.model)?;
        worksheet.write_string(row, 3, &facts.os_version)?;
        worksheet.write_string(row, 4, &facts.serial_number)?;
        worksheet.write_string(row, 5, format_uptime(facts.uptime))?;
    }
    worksheet.set_column_width(0, 25)?;
    worksheet.set_column_width(2, 20)?;
    worksheet.set_column_width(3, 20)?;
    worksheet.set_column_width(4, 18)?;
    Ok(())
}

fn write_interfaces_sheet(
    workbook: &mut Workbook,
    header: &Format,
    reports: &[HostReport],
) -> Result<(), XlsxError> {
    let headers = [
        "Switch",
        "Interface name",
        "Description",
        "Admin Status",
        "Oper Status",
        "Speed",
    ];
    let worksheet = new_sheet(workbook, "Interfaces", &headers, header)?;
    let mut row: u32 = 1;
    for report in reports {
        for detail in &report.facts.interfaces {
            worksheet.write_string(row, 0, &report.facts.host)?;
            worksheet.write_string(row, 1, &detail.interface)?;
            worksheet.write_string(row, 2, &detail.description)?;
            worksheet.write_boolean(row, 3, detail.is_enabled)?;
            worksheet.write_boolean(row, 4, detail.is_up)?;
            worksheet.write_number(row, 5, detail.speed)?;
            row += 1;
        }
    }
    worksheet.set_column_width(0, 25)?;
    worksheet.set_column_width(1, 25)?;
    worksheet.set_column_width(2, 35)?;
    Ok(())
}

fn write_mac_table_sheet(
    workbook: &mut Workbook,
    header: &Format,
    reports: &[HostReport],
) -> Result<(), XlsxError> {
    let headers = ["Switch", "Interface", "MACaddr", "Vendor OUI"];
    let worksheet = new_sheet(workbook, "Mac Table Vendors", &headers, header)?;
    let mut row: u32 = 1;
    for report in reports {
        for mac_row in &report.classification.mac_rows {
            worksheet.write_string(row, 0, &report.facts.host)?;
            worksheet.write_string(row, 1, &mac_row.interface)?;
            worksheet.write_string(row, 2, &mac_row.mac)?;
            worksheet.write_string(row, 3, &mac_row.vendor)?;
            row += 1;
        }
    }
    worksheet.set_column_width(0, 25)?;
    worksheet.set_column_width(2, 20)?;
    worksheet.set_column_width(3, 30)?;
    Ok(())
}

fn write_lldp_sheet(
    workbook: &mut Workbook,
    header: &Format,
    reports: &[HostReport],
) -> Result<(), XlsxError> {
    let headers = [
        "Local Switch",
        "Local Port",
        "Remote System ID",
        "Remote System Name",
        "Remote System Description",
        "Remote Port ID",
        "Remote Port Description",
        "Remote Capability",
        "Remote Vendor",
    ];
    let worksheet = new_sheet(workbook, "LLDP Neighbors", &headers, header)?;
    let mut row: u32 = 1;
    for report in reports {
        for lldp in &report.lldp_rows {
            let neighbor = &lldp.neighbor;
            worksheet.write_string(row, 0, &report.facts.host)?;
            worksheet.write_string(row, 1, &neighbor.local_interface)?;
            worksheet.write_string(row, 2, &neighbor.remote_chassis_id)?;
            worksheet.write_string(row, 3, &neighbor.remote_system_name)?;
            worksheet.write_string(row, 4, &neighbor.remote_system_description)?;
            worksheet.write_string(row, 5, &neighbor.remote_port)?;
            worksheet.write_string(row, 6, &neighbor.remote_port_description)?;
            worksheet.write_string(row, 7, format!("{:?}", neighbor.remote_system_capab))?;
            worksheet.write_string(row, 8, &lldp.remote_vendor)?;
            row += 1;
        }
    }
    worksheet.set_column_width(0, 25)?;
    worksheet.set_column_width(3, 25)?;
    worksheet.set_column_width(4, 40)?;
    worksheet.set_column_width(7, 25)?;
    Ok(())
}

fn write_multi_mac_sheet(
    workbook: &mut Workbook,
    header: &Format,
    reports: &[HostReport],
) -> Result<(), XlsxError> {
    let headers = ["Switch", "Interface", "Count", "Vendor MACs"];
    let worksheet = new_sheet(workbook, "Multi Mac Ports", &headers, header)?;
    let mut row: u32 = 1;
    for report in reports {
        for (interface, vendors) in &report.classification.vendors {
            if vendors.len() < 2 {
                continue;
            }
            worksheet.write_string(row, 0, &report.facts.host)?;
            worksheet.write_string(row, 1, interface)?;
            worksheet.write_number(row, 2, vendors.len() as f64)?;
            worksheet.write_string(row, 3, vendors.join(", "))?;
            row += 1;
        }
    }
    worksheet.set_column_width(0, 25)?;
    worksheet.set_column_width(3, 50)?;
    Ok(())
}

fn write_exclusions_sheet(
    workbook: &mut Workbook,
    header: &Format,
    reports: &[HostReport],
) -> Result<(), XlsxError> {
    let headers = ["Switch", "Interface", "Reason", "Port Description"];
    let worksheet = new_sheet(workbook, "Port Exclusion Recommendations", &headers, header)?;
    let mut row: u32 = 1;
    for report in reports {
        for record in &report.classification.exclusions {
            write_exclusion_row(worksheet, row, record)?;
            row += 1;
        }
    }
    worksheet.set_column_width(0, 25)?;
    worksheet.set_column_width(2, 60)?;
    worksheet.set_column_width(3, 35)?;
    Ok(())
}

fn write_exclusion_row(
    worksheet: &mut Worksheet,
    row: u32,
    record: &ExclusionRecord,
) -> Result<(), XlsxError> {
    worksheet.write_string(row, 0, &record.host)?;
    worksheet.write_string(row, 1, &record.interface)?;
    worksheet.write_string(row, 2, record.reasons.join("; "))?;
    worksheet.write_string(row, 3, record.description.as_deref().unwrap_or(""))?;
    Ok(())
}

fn write_failures_sheet(
    workbook: &mut Workbook,
    header: &Format,
    failures: &[HostFailure],
) -> Result<(), XlsxError> {
    let headers = ["Switch", "Hostname", "Error"];
    let worksheet = new_sheet(workbook, "Failed Devices", &headers, header)?;
    for (idx, failure) in failures.iter().enumerate() {
        let row = (idx + 1) as u32;
        worksheet.write_string(row, 0, &failure.host)?;
        worksheet.write_string(row, 1, &failure.hostname)?;
        worksheet.write_string(row, 2, &failure.error)?;
    }
    worksheet.set_column_width(0, 25)?;
    worksheet.set_column_width(2, 60)?;
    Ok(())
}

/// Seconds of uptime as "12d 4h 36m".
fn format_uptime(seconds: f64) -> String {
    let total_minutes = (seconds.max(0.0) as u64) / 60;
    let days = total_minutes / (24 * 60);
    let hours = (total_minutes / 60) % 24;
    let minutes = total_minutes % 60;
    format!("{days}d {hours}h {minutes}m")
}
