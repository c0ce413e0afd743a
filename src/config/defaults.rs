//! Built-in registry content and analysis defaults.
//!
//! These mirror the curated knowledge bases used to clean the fleet's
//! historical exports. A `sparecast.toml` file can replace any of them;
//! absent a file, these values apply unchanged.

/// Known brand literals. Order here is irrelevant — the pattern library
/// re-sorts by descending length before compiling the alternation so that
/// multi-word brands win over their single-word substrings.
pub const BRANDS: &[&str] = &[
    // General & automotive
    "YANMAR", "CUMMINS", "MITSUBISHI", "CATERPILLAR", "CAT", "KOMATSU", "DAIHATSU",
    "PERKINS", "VOLVO", "SCANIA", "MAN", "DEUTZ", "WEICHAI", "NISSAN", "HINO", "ISUZU",
    "TOYOTA", "HONDA", "SUZUKI", "YAMAHA", "HYUNDAI", "KIA", "MAZDA", "MERCEDES", "BMW",
    "FORD", "CHEVROLET", "GM", "JEEP", "LAND ROVER", "RENAULT", "PEUGEOT", "FIAT", "IVECO",
    // Filters & supporting parts
    "DONALDSON", "FLEETGUARD", "SAKURA", "JIMCO", "UNION", "BALDWIN", "FRAM", "MANN",
    "RACOR", "PARKER", "SURE", "VIC", "ASPIRA", "DENSO", "BOSCH", "NGK", "CHAMPION",
    // Electrical & instruments
    "SCHNEIDER", "ABB", "SIEMENS", "OMRON", "FUJI", "MITSUBISHI ELECTRIC", "LG", "LS",
    "PHILIPS", "OSRAM", "PANASONIC", "MATSUSHITA", "TOSHIBA", "HITACHI", "YOKOGAWA",
    "CHINT", "GAE", "HAGER", "LEGRAND", "BROCO", "UTEX", "FLUKE", "KYORITSU", "SANWA",
    "AUTONICS", "TELEMECANIQUE", "MERLIN GERIN", "SOCOMEC", "FINDER", "IDEC",
    // Pumps, valves & piping systems
    "EBARA", "GRUNDFOS", "KSB", "WILO", "SULZER", "FLOWSERVE", "ITT", "XYLEM", "PENTAIR",
    "TAIKO", "SHINKO", "TEIKOKU", "NANIWA", "HEISHIN", "SASAKURA", "MIURA", "VOLCANO",
    "KITZ", "TOYO", "YOSHITAKE", "SHOWA", "TOMOE", "CRANE", "JENKINS", "SPIRAX SARCO",
    "TLV", "VELAN", "ONDAL", "GF", "AVK", "ONDINE", "HIGHLAND",
    // Bearings & seals
    "SKF", "FAG", "NTN", "KOYO", "TIMKEN", "NSK", "NACHI", "ASAHI", "IKO", "INA", "THK",
    "FYH", "NOK", "VALQUA", "GARLOCK", "KLINGRIT", "CHESTERTON", "JAMES WALKER",
    // Marine & specialist engines
    "ALFA LAVAL", "WESTFALIA", "GEA", "MITSUBISHI KAKOKI", "SAMGONG", "HANSHIN",
    "AKASAKA", "MAK", "WARTSILA", "MAN B&W", "PIELSTICK", "MTU", "DETROIT",
    "NIIGATA", "KAWASAKI", "IHI", "NAPIER", "WOODWARD", "GARRETT", "HOLSET", "BORGWARNER",
    "TANABE", "HATLAPA", "MACGREGOR", "SPERRY", "FURUNO", "JRC", "TOKYO KEIKI",
    // Tools & chemicals
    "TEKIRO", "KRISBOW", "MAKITA", "DEWALT", "STANLEY", "SNAP-ON", "FACOM",
    "RIDGID", "LOCTITE", "DEVCON", "WD-40", "MOLYKOTE", "THREEBOND", "DEXBOND",
    "JOTUN", "HEMPEL", "INTERNATIONAL", "NIPPON PAINT", "KANSAI", "SIGMA",
    // Chinese & other frequent makers
    "WUXI", "ANTAI", "GUANGZHOU", "NANTONG", "ZIBO", "ZICHAI", "SHANGHAI", "HANGZHOU",
    "SANY", "XCMG", "LIUGONG", "ZOOMLION", "SHANTUI", "FOTON", "FAW", "DONGFENG",
    "HOWO", "SINOTRUK", "JAC", "YUCHAI", "ADVANCE", "FESTO", "SMC", "CKD",
    "REXROTH", "VICKERS", "EATON", "DANFOSS", "HYDAC",
];

/// Ordered category registry. Declaration order is load-bearing: the first
/// category with any word-boundary keyword hit wins.
pub const CATEGORIES: &[(&str, &[&str])] = &[
    ("BEARING", &["BEARING", "LAHER", "BANTALAN", "BALL BEARING", "ROLLER BEARING", "PILLOW BLOCK", "CONE", "CUP"]),
    ("SEAL", &["SEAL", "SIL", "OIL SEAL", "O-RING", "ORING", "GASKET", "PACKING", "PAKING", "MECHANICAL SEAL"]),
    ("VALVE", &["VALVE", "KRAN", "GATE", "GLOBE", "BALL", "BUTTERFLY", "CHECK", "SAFETY", "RELIEF", "SOLENOID", "ANGLE", "COCK"]),
    ("FILTER", &["FILTER", "SARINGAN", "STRAINER", "SEPARATOR", "PURIFIER", "ELEMENT", "CARTRIDGE", "BREATHER"]),
    ("PUMP", &["PUMP", "POMPA", "IMPELLER", "CASING", "SHAFT", "ROTOR", "STATOR", "VOLUTE", "DIFFUSER"]),
    ("ENGINE PART", &["PISTON", "LINER", "RING", "ROD", "CRANKSHAFT", "CAMSHAFT", "HEAD", "ROCKER", "INJECTOR", "NOZZLE", "PLUNGER", "TURBO", "ENGINE", "DIESEL", "METAL"]),
    ("ELECTRICAL", &["KABEL", "CABLE", "WIRE", "LAMPU", "LAMP", "LIGHT", "BOHLAM", "FUSE", "MCB", "MCCB", "CONTACTOR", "RELAY", "SENSOR", "SWITCH", "MOTOR", "GENERATOR", "AVR", "BATTERY", "PANEL", "TRAFO"]),
    ("PIPE FITTING", &["PIPE", "PIPA", "HOSE", "FLANGE", "ELBOW", "TEE", "REDUCER", "COUPLING", "UNION", "NIPPLE", "SOCKET", "ADAPTER", "FITTING", "CONNECTOR"]),
    ("FASTENER", &["BAUT", "MUR", "BOLT", "NUT", "SCREW", "WASHER", "STUD", "PIN", "RIVET", "CLAMP", "CLIP", "BRACKET"]),
    ("TOOL", &["TOOL", "ALAT", "KUNCI", "WRENCH", "SPANNER", "HAMMER", "OBENG", "DRILL", "GERINDA", "CUTTER", "MEASURE", "PLIER", "TANG"]),
    ("CHEMICAL", &["CAT", "PAINT", "THINNER", "GREASE", "OLI", "OIL", "LUBRICANT", "LEM", "GLUE", "SEALANT", "RESIN", "HARDENER", "CLEANER"]),
    ("SAFETY", &["SAFETY", "HELMET", "GLOVE", "SHOE", "BOOT", "MASKER", "GOGGLE", "WEARPACK", "HARNESS", "LIFE", "EXTINGUISHER", "APAR"]),
    ("STATIONERY", &["KERTAS", "PEN", "BUKU", "BINDER", "MAP", "STAPLES", "TINTA", "TONER", "CARTON", "LAKBAN", "TAPE"]),
];

/// Rating-like tokens that look like part numbers but are not. The
/// first-token heuristic refuses these.
pub const PART_NUMBER_BLACKLIST: &[&str] = &[
    "10K", "5K", "16K", "20K", "30K", "PN10", "PN16", "SCH40", "SCH80", "TYPE", "SIZE",
];

/// Unit vocabulary for quantity tokens. Order matters inside the compiled
/// alternation: longer units come before their prefixes (MM before M).
pub const UNITS: &[&str] = &[
    "MM", "CM", "M", "INCH", "KG", "LTR", "VOLT", "WATT", "AMP", "A", "HP", "KW",
    "KVA", "BAR", "PSI", "V", "HZ", "\"",
];

/// Minimum observed (non-gap-filled) months of history before a forecast
/// is attempted.
pub const MIN_HISTORY_MONTHS: usize = 10;

/// Months held out from the tail of the series for backtesting.
pub const BACKTEST_HOLDOUT_MONTHS: usize = 3;

/// Two-sided confidence level for forecast interval bounds.
pub const INTERVAL_CONFIDENCE: f64 = 0.95;

/// Largest horizon the CLI accepts. The library itself accepts any
/// horizon >= 1.
pub const MAX_HORIZON_MONTHS: usize = 12;
