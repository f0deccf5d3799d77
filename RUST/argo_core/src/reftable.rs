//! Argo reference tables used by the history report.
//!
//! Lookups trim the code and never fail: a blank code and an unknown code
//! each map to a fixed description.

const EMPTY: &str = "Empty string!";

/// Reference table 4: data centres and institutions.
pub fn institution(code: &str) -> &'static str {
    match code.trim() {
        "AO" => "AOML, USA",
        "BO" => "BODC, United Kingdom",
        "CI" => "Institute of Ocean Sciences, Canada",
        "CS" => "CSIRO, Australia",
        "GE" => "BSH, Germany",
        "GT" => "GTS: used for data coming from WMO GTS network",
        "HZ" => "CSIO, China Second Institute of Oceanography",
        "IF" => "Ifremer, France",
        "IN" => "INCOIS, India",
        "JA" => "JMA, Japan",
        "JM" => "Jamstec, Japan",
        "KM" => "KMA, Korea",
        "KO" => "KORDI, Korea",
        "MB" => "MBARI, USA",
        "ME" => "MEDS, Canada",
        "NA" => "NAVO, USA",
        "NM" => "NMDIS, China",
        "PM" => "PMEL, USA",
        "RU" => "Russia",
        "SI" => "SIO, Scripps, USA",
        "SP" => "Spain",
        "UW" => "University of Washington, USA",
        "VL" => "Far Eastern Regional Hydrometeorological Research Institute of Vladivostock, Russia",
        "WH" => "Woods Hole Oceanographic Institution, USA",
        "" => EMPTY,
        _ => "Unknown code for table 4!",
    }
}

/// Reference table 7: history action codes.
pub fn action(code: &str) -> &'static str {
    match code.trim() {
        "CF" => "Change a quality flag",
        "CR" => "Create record",
        "CV" => "Change value",
        "DC" => "Station was checked by duplicate checking software",
        "ED" => "Edit a parameter value",
        "IP" => "This history group operates on the complete input record",
        "NG" => "No good trace",
        "PE" => "Position error. Profile position has been erroneously encoded. Corrected if possible.",
        "QC" => "Quality Control",
        "QCF$" => "Tests failed",
        "QCP$" => "Test performed",
        "SV" => "Set a value",
        "TE" => "Time error. Profile data/time has been erroneously encoded. correct if possible",
        "UP" => "Station passed through the update program",
        "" => EMPTY,
        _ => "Unknown code for table 7!",
    }
}

/// Reference table 12: history step codes.
pub fn history_step(code: &str) -> &'static str {
    match code.trim() {
        "ARFM" => "Convert raw data from telecommunications system to a processing format",
        "ARGQ" => "Automatic QC of data reported in real-time has been performed",
        "IGO3" => "Checking for duplicates has been performed",
        "ARSQ" => "Delayed mode QC has been performed",
        "ARCA" => "Calibration has been performed",
        "ARUP" => "Real-time data have been archived locally and sent to GDACs",
        "ARDU" => "Delayed data have been archived locally and sent to GDACs",
        "RFMT" => "Reformat software to convert hexadecimal format reported by the buoy to our standard format",
        "COOA" => "Coriolis objective analysis performed",
        "" => EMPTY,
        _ => "Unknown code for table 12!",
    }
}

/// GDAC directory of the data assembly centre behind a table 4 code.
pub fn data_centre(code: &str) -> Option<&'static str> {
    let dac = match code.trim() {
        "AO" => "aoml",
        "BO" => "bodc",
        "CS" => "csiro",
        "HZ" => "csio",
        "IF" => "coriolis",
        "IN" => "incois",
        "JA" => "jma",
        "KM" => "kma",
        "KO" => "kordi",
        "ME" => "meds",
        "NM" => "nmdis",
        _ => return None,
    };
    Some(dac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_trimmed() {
        assert_eq!(institution(" IF "), "Ifremer, France");
        assert_eq!(action("QCP$"), "Test performed");
        assert_eq!(history_step("ARGQ  "), "Automatic QC of data reported in real-time has been performed");
    }

    #[test]
    fn fallbacks() {
        assert_eq!(institution("   "), "Empty string!");
        assert_eq!(action(""), "Empty string!");
        assert_eq!(history_step("XXXX"), "Unknown code for table 12!");
        assert_eq!(action("ZZ"), "Unknown code for table 7!");
        assert_eq!(institution("??"), "Unknown code for table 4!");
    }

    #[test]
    fn dac_directories() {
        assert_eq!(data_centre("IF"), Some("coriolis"));
        assert_eq!(data_centre("PM"), None);
    }
}
