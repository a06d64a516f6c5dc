//! Sample data for the demo binary.
//!
//! Two structures are available: a flat list of records to feed through the date index, and a
//! hand-organised folder tree grouped by category.

use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use medfolder_core::{Folder, MedicalComponentFactory, MedicalRecord, RecordItem};

const SAMPLE_PATIENT_ID: i64 = 101;

fn date(value: &str) -> anyhow::Result<DateTime<Utc>> {
    let day: NaiveDate = value
        .parse()
        .with_context(|| format!("invalid sample date '{value}'"))?;
    Ok(day.and_time(NaiveTime::MIN).and_utc())
}

/// Records inserted into the index, in insertion order.
pub fn sample_records() -> anyhow::Result<Vec<MedicalRecord>> {
    Ok(vec![
        MedicalRecord::new(
            1,
            SAMPLE_PATIENT_ID,
            date("2023-05-15")?,
            "Common Cold",
            "Rest and fluids",
            "Patient reported symptoms 2 days ago",
        ),
        MedicalRecord::new(
            2,
            SAMPLE_PATIENT_ID,
            date("2023-02-10")?,
            "Sprained Ankle",
            "Ice and elevation",
            "Injury occurred during sports",
        ),
        MedicalRecord::new(
            3,
            SAMPLE_PATIENT_ID,
            date("2023-07-22")?,
            "Annual Checkup",
            "No treatment needed",
            "All vitals normal",
        ),
        MedicalRecord::new(
            4,
            SAMPLE_PATIENT_ID,
            date("2023-01-05")?,
            "Flu",
            "Tamiflu prescribed",
            "High fever and body aches",
        ),
        MedicalRecord::new(
            5,
            SAMPLE_PATIENT_ID,
            date("2023-09-12")?,
            "Allergic Reaction",
            "Antihistamine",
            "Reaction to new medication",
        ),
    ])
}

fn entry(
    id: i64,
    name: &str,
    on: &str,
    diagnosis: &str,
    treatment: &str,
    notes: &str,
) -> anyhow::Result<RecordItem> {
    Ok(MedicalComponentFactory::create_record(
        id,
        name,
        date(on)?,
        diagnosis,
        treatment,
        notes,
        None,
    ))
}

/// Hand-organised structure: a "Patient Records" root with one folder per category.
pub fn manual_structure() -> anyhow::Result<Folder> {
    let mut root = MedicalComponentFactory::create_folder("root", "Patient Records");

    root.add_folder(appointments()?);
    root.add_folder(diagnoses()?);
    root.add_folder(treatments()?);
    root.add_folder(lab_results()?);
    root.add_folder(medications()?);

    Ok(root)
}

fn appointments() -> anyhow::Result<Folder> {
    let mut folder = MedicalComponentFactory::create_folder("appointments", "Appointments");
    folder.add_record(entry(
        3,
        "Annual Checkup",
        "2023-07-22",
        "Annual Checkup",
        "No treatment needed",
        "All vitals normal",
    )?);
    folder.add_record(entry(
        6,
        "Follow-up Visit",
        "2023-08-15",
        "Post-treatment follow-up",
        "No further treatment needed",
        "Recovery proceeding well",
    )?);
    folder.add_record(entry(
        7,
        "Specialist Consultation",
        "2023-06-05",
        "Cardiology consultation",
        "Additional tests recommended",
        "Referred for echocardiogram",
    )?);
    Ok(folder)
}

fn diagnoses() -> anyhow::Result<Folder> {
    let mut folder = MedicalComponentFactory::create_folder("diagnosis", "Diagnoses");
    folder.add_record(entry(
        1,
        "Common Cold",
        "2023-05-15",
        "Common Cold",
        "Rest and fluids",
        "Patient reported symptoms 2 days ago",
    )?);
    folder.add_record(entry(
        8,
        "Hypertension",
        "2023-04-10",
        "Stage 1 Hypertension",
        "Prescribed ACE inhibitor",
        "Recommend lifestyle changes and follow-up in 3 months",
    )?);
    folder.add_record(entry(
        9,
        "Migraine",
        "2023-03-21",
        "Chronic Migraine",
        "Prescribed sumatriptan",
        "Advised to keep headache journal",
    )?);
    Ok(folder)
}

fn treatments() -> anyhow::Result<Folder> {
    let mut folder = MedicalComponentFactory::create_folder("treatment", "Treatments");
    folder.add_record(entry(
        2,
        "Sprained Ankle",
        "2023-02-10",
        "Sprained Ankle",
        "Ice and elevation",
        "Injury occurred during sports",
    )?);
    folder.add_record(entry(
        10,
        "Physical Therapy",
        "2023-02-25",
        "Ankle rehabilitation",
        "8-week therapy program",
        "Twice weekly sessions recommended",
    )?);
    Ok(folder)
}

fn lab_results() -> anyhow::Result<Folder> {
    let mut folder = MedicalComponentFactory::create_folder("lab-results", "Lab Results");
    folder.add_record(entry(
        11,
        "Complete Blood Count",
        "2023-07-20",
        "Routine bloodwork",
        "No abnormalities detected",
        "All values within normal range",
    )?);
    folder.add_record(entry(
        12,
        "Lipid Panel",
        "2023-07-20",
        "Cholesterol screening",
        "Slightly elevated LDL",
        "Dietary changes recommended",
    )?);
    Ok(folder)
}

fn medications() -> anyhow::Result<Folder> {
    let mut folder = MedicalComponentFactory::create_folder("medications", "Medications");
    folder.add_record(entry(
        13,
        "Amoxicillin",
        "2023-05-15",
        "Bacterial infection",
        "500mg 3x daily for 10 days",
        "Take with food to reduce GI upset",
    )?);
    folder.add_record(entry(
        14,
        "Ibuprofen",
        "2023-02-10",
        "Pain management",
        "400mg every 6 hours as needed",
        "Do not exceed 1600mg in 24 hours",
    )?);
    Ok(folder)
}
