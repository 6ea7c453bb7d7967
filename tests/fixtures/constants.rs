// This file is autogenerated using esteid-update on 2026-10-16 12:00:00

pub const TEST_CERTS: &[(&str, &str)] = &[
    ("EE Certification Centre Root CA", "EE_Certification_Centre_Root_CA.pem"),
    ("ESTEID2018", "esteid2018.pem"),
    ("TEST of EE Certification Centre Root CA", "TEST_of_EE_Certification_Centre_Root_CA.pem"),
];

pub const LIVE_CERTS: &[(&str, &str)] = &[
    ("EE Certification Centre Root CA", "EE_Certification_Centre_Root_CA.pem"),
    ("TEST of EE Certification Centre Root CA", "TEST_of_EE_Certification_Centre_Root_CA.pem"),
    ("TEST of ESTEID2018", "TEST_of_ESTEID2018.pem"),
];

pub const ISSUER_CERTS: &[(&str, &str)] = &[
    ("EE Certification Centre Root CA", "EE_Certification_Centre_Root_CA.pem"),
    ("ESTEID2018", "esteid2018.pem"),
    ("TEST of EE Certification Centre Root CA", "TEST_of_EE_Certification_Centre_Root_CA.pem"),
    ("TEST of ESTEID2018", "TEST_of_ESTEID2018.pem"),
];

pub const ROOT_CA_FILE_NAME: &str = "EE_Certification_Centre_Root_CA.pem";
pub const TEST_ROOT_CA_FILE_NAME: &str = "TEST_of_EE_Certification_Centre_Root_CA.pem";
