use shared_types::*;
use std::fs;
use std::path::PathBuf;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for the controller's command API
    let mut types = Vec::new();

    // Extraction types
    types.push(clean_type(Contact::export_to_string()?));
    types.push(clean_type(ExtractionResult::export_to_string()?));
    types.push(clean_type(ReconciledFields::export_to_string()?));
    types.push(clean_type(WorkOrderFields::export_to_string()?));

    // Customer types
    types.push(clean_type(CustomerSearchRequest::export_to_string()?));
    types.push(clean_type(CustomerRecord::export_to_string()?));
    types.push(clean_type(CustomerSearchResult::export_to_string()?));
    types.push(clean_type(NewCustomerRequest::export_to_string()?));

    // Job types
    types.push(clean_type(SoldTo::export_to_string()?));
    types.push(clean_type(JobShipTo::export_to_string()?));
    types.push(clean_type(JobDetails::export_to_string()?));
    types.push(clean_type(BillingGroup::export_to_string()?));
    types.push(clean_type(AlternateContact::export_to_string()?));
    types.push(clean_type(JobSubmissionPayload::export_to_string()?));
    types.push(clean_type(JobCreatedResponse::export_to_string()?));

    // Session types
    types.push(clean_type(WorkflowState::export_to_string()?));
    types.push(clean_type(Severity::export_to_string()?));
    types.push(clean_type(Notification::export_to_string()?));
    types.push(clean_type(SessionSnapshot::export_to_string()?));
    types.push(clean_type(SessionResponse::export_to_string()?));
    types.push(clean_type(FieldUpdateRequest::export_to_string()?));
    types.push(clean_type(CustomerSearchResponse::export_to_string()?));
    types.push(clean_type(BackendStatus::export_to_string()?));
    types.push(clean_type(StatusResponse::export_to_string()?));

    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("../static/js/api-types"));
    fs::create_dir_all(&output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    // Everything lands in one file, so cross-type imports are dropped
    let filtered: Vec<&str> = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect();

    let result = filtered.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
