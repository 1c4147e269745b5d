//! The built-in corpus: three Dept-7 case letters plus the twelve
//! classified archive volumes.

use dossier_core::{CaseFile, FileCategory};

lazy_static::lazy_static! {
    static ref CASE_LETTERS: Vec<CaseFile> = build_case_letters();
    static ref ARCHIVE_VOLUMES: Vec<CaseFile> = build_archive_volumes();
}

/// The three case letters loaded into the cabinet at startup.
pub fn case_letters() -> Vec<CaseFile> {
    CASE_LETTERS.clone()
}

/// The twelve classified archive volumes.
pub fn archive_volumes() -> Vec<CaseFile> {
    ARCHIVE_VOLUMES.clone()
}

fn build_case_letters() -> Vec<CaseFile> {
    vec![
        CaseFile::new(
            "The Silent Lake Sighting",
            "Detective Vance",
            "Archivist Delta",
            "April 22, 1979",
            FileCategory::Emails,
            "Reports coming in from the north ridge. Something was pulled from the silt. \
             It wasn't organic, but it was breathing.\n\n[REDACTED] has ordered a total \
             perimeter blackout. Do not engage.",
        )
        .with_id("case-1"),
        CaseFile::new(
            "Incident Report #402",
            "Officer Miller",
            "HQ - Internal Affairs",
            "Nov 12, 1978",
            FileCategory::Statements,
            "Statement taken from witness Paul S.\nWitness claims he heard 'metal \
             screaming' beneath the floorboards. When we arrived, the temperature in \
             the room was exactly 0°C. Paul has been missing since the interview.",
        )
        .with_id("case-2"),
        CaseFile::new(
            "Evidence: Basement 4B",
            "Forensics",
            "Case Manager",
            "Oct 05, 1979",
            FileCategory::Evidence,
            "Found at the center of the exclusion zone. It appears to be a biological \
             key, or perhaps a localized beacon.",
        )
        .with_id("case-3")
        .with_reconstruction_prompt(
            "A dark, damp basement with flickering lights and a pulsing biological \
             object on a wooden table. Shadows moving in the background.",
        ),
    ]
}

fn build_archive_volumes() -> Vec<CaseFile> {
    vec![
        CaseFile::new(
            "Volume I: Flight Logs",
            "FBI Aviation Unit",
            "Case Director",
            "January 15, 2020",
            FileCategory::Evidence,
            "Recovered flight manifests showing 2,618 flights to Little St. James \
             between 1998-2019. Aircraft registration numbers N908JE and N212JE appear \
             most frequently. Passenger lists remain partially redacted pending court \
             order.",
        )
        .with_id("archive-1"),
        CaseFile::new(
            "Volume II: The Black Book",
            "Evidence Custodian",
            "Prosecution Team",
            "February 03, 2020",
            FileCategory::Evidence,
            "Contact directory recovered from Epstein's residence. Contains entries for \
             prominent politicians, business leaders, and celebrities. Many entries \
             include coded notations and frequency indicators.",
        )
        .with_id("archive-2"),
        CaseFile::new(
            "Volume III: Temple Blueprints",
            "Forensic Architecture",
            "Investigation Lead",
            "February 20, 2020",
            FileCategory::Evidence,
            "Blueprints reveal underground tunnel network connecting the blue-domed \
             temple to multiple structures. Thermal imaging indicates active electrical \
             systems beneath main building.",
        )
        .with_id("archive-3"),
        CaseFile::new(
            "Volume IV: Witness Statements",
            "Interview Unit",
            "Case File",
            "March 08, 2020",
            FileCategory::Statements,
            "Consolidated testimony from 47 witnesses. Common themes include: \
             recruitment under false pretenses, transportation to private locations, \
             and subsequent intimidation. Several witnesses report observing \
             high-profile individuals.",
        )
        .with_id("archive-4"),
        CaseFile::new(
            "Volume V: Financial Records",
            "Forensic Accounting",
            "Asset Recovery",
            "March 22, 2020",
            FileCategory::Evidence,
            "Analysis of shell companies and offshore accounts. Over $500 million in \
             unexplained transfers identified. Key entities: Southern Trust, Zorro \
             Ranch LLC, and multiple Virgin Islands corporations.",
        )
        .with_id("archive-5"),
        CaseFile::new(
            "Volume VI: Security Protocols",
            "Security Analysis",
            "Operations",
            "April 05, 2020",
            FileCategory::Emails,
            "Internal memos detailing surveillance systems, guard rotations, and \
             visitor screening procedures. Evidence of advanced counter-surveillance \
             measures at all Epstein properties.",
        )
        .with_id("archive-6"),
        CaseFile::new(
            "Volume VII: Island Staff",
            "Personnel Records",
            "Human Resources",
            "April 18, 2020",
            FileCategory::Statements,
            "Employee rosters for Little St. James and Great St. James. High turnover \
             rate noted. Several former staff members report witnessing unusual \
             activities and being bound by NDAs.",
        )
        .with_id("archive-7"),
        CaseFile::new(
            "Volume VIII: Communications",
            "Digital Forensics",
            "Technical Unit",
            "May 01, 2020",
            FileCategory::Evidence,
            "Recovered emails, text messages, and encrypted communications. Analysis \
             reveals coordination between Epstein's network and various international \
             contacts. Several messages contain coded language.",
        )
        .with_id("archive-8"),
        CaseFile::new(
            "Volume IX: Medical Records",
            "Medical Examiner",
            "Coroner",
            "May 15, 2020",
            FileCategory::Evidence,
            "Autopsy report and medical documentation. Cause of death: suicide by \
             hanging. Note: Previous suicide attempt on July 23, 2019. Full toxicology \
             report attached.",
        )
        .with_id("archive-9"),
        CaseFile::new(
            "Volume X: Legal Proceedings",
            "Court Records",
            "Legal Department",
            "June 01, 2020",
            FileCategory::Emails,
            "2008 plea agreement details and subsequent litigation. Non-prosecution \
             agreement signed by Alexander Acosta. Terms included 13-month sentence and \
             immunity for co-conspirators.",
        )
        .with_id("archive-10"),
        CaseFile::new(
            "Volume XI: International Connections",
            "Intelligence Liaison",
            "Director",
            "June 15, 2020",
            FileCategory::Statements,
            "Cross-border investigations reveal connections in France, UK, and Middle \
             East. Multiple international properties identified. Cooperation with \
             foreign agencies ongoing.",
        )
        .with_id("archive-11"),
        CaseFile::new(
            "Volume XII: Unanswered Questions",
            "Case Review Board",
            "Attorney General",
            "July 01, 2020",
            FileCategory::Evidence,
            "Summary of outstanding issues: Who were all the visitors? What happened to \
             missing evidence? Why were surveillance cameras disabled during critical \
             periods? Investigation remains open.",
        )
        .with_id("archive-12"),
    ]
}
