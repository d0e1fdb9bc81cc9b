use serde::{Deserialize, Serialize};

/// Square feet to square metres
const SQFT_TO_SQM: f64 = 0.0929;
/// Baseline comparison bulb: 60W incandescent per LED bulb replaced
const INCANDESCENT_WATTS_PER_BULB: u32 = 60;
/// Usage assumption: 6 hours/day * 30 days
const HOURS_PER_MONTH: f64 = 180.0;
/// Electricity tariff in currency-units per kWh
const RATE_PER_KWH: f64 = 8.0;

/// Room types with their illuminance targets
///
/// The lux values are contract-bearing: the calculator's published numbers
/// depend on them, so they live here as one fixed table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoomType {
    Bedroom,
    Living,
    Kitchen,
    Bathroom,
    Office,
    Garage,
}

impl RoomType {
    pub const ALL: [RoomType; 6] = [
        RoomType::Bedroom,
        RoomType::Living,
        RoomType::Kitchen,
        RoomType::Bathroom,
        RoomType::Office,
        RoomType::Garage,
    ];

    /// Illuminance target in lux (lumens per square metre)
    pub fn lux_required(&self) -> u32 {
        match self {
            RoomType::Bedroom => 150,
            RoomType::Living => 200,
            RoomType::Kitchen => 300,
            RoomType::Bathroom => 250,
            RoomType::Office => 350,
            RoomType::Garage => 200,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            RoomType::Bedroom => "bedroom",
            RoomType::Living => "living",
            RoomType::Kitchen => "kitchen",
            RoomType::Bathroom => "bathroom",
            RoomType::Office => "office",
            RoomType::Garage => "garage",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.id() == id)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoomType::Bedroom => "Bedroom",
            RoomType::Living => "Living Room",
            RoomType::Kitchen => "Kitchen",
            RoomType::Bathroom => "Bathroom",
            RoomType::Office => "Office/Study",
            RoomType::Garage => "Garage/Storage",
        }
    }
}

/// A wattage/lumen pair the customer can pick (fixed 90 lm/W ladder)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulbOption {
    pub watts: u32,
    pub lumens: u32,
}

/// The fixed bulb ladder offered by the calculator
pub const BULB_OPTIONS: [BulbOption; 6] = [
    BulbOption { watts: 7, lumens: 630 },
    BulbOption { watts: 9, lumens: 810 },
    BulbOption { watts: 12, lumens: 1080 },
    BulbOption { watts: 15, lumens: 1350 },
    BulbOption { watts: 18, lumens: 1620 },
    BulbOption { watts: 22, lumens: 1980 },
];

impl BulbOption {
    /// Resolve a wattage the customer typed to a ladder entry
    pub fn for_watts(watts: u32) -> Option<Self> {
        BULB_OPTIONS.iter().copied().find(|b| b.watts == watts)
    }

    pub fn label(&self) -> String {
        format!("{}W LED", self.watts)
    }
}

/// Everything the results view shows, derived in one pass
///
/// Pure function of the inputs - recomputed on every change, never cached.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CalculationResult {
    /// Room area in square feet
    pub area_sq_ft: f64,
    /// Total lumens required after the ceiling-height adjustment, rounded
    pub total_lumens_needed: u32,
    /// Number of bulbs of the chosen option needed (always >= 1)
    pub bulbs_needed: u32,
    /// Energy saved vs the incandescent baseline, percent
    pub energy_saved_percent: u32,
    /// Monthly running cost with LED bulbs, currency-units
    pub monthly_cost_led: u32,
    /// Monthly running cost with the incandescent baseline, currency-units
    pub monthly_cost_incandescent: u32,
    pub monthly_savings: u32,
    pub yearly_savings: u32,
}

/// Lighting requirement calculator
pub struct LightingCalculator;

impl LightingCalculator {
    /// Work out how many bulbs a room needs and what they cost to run
    ///
    /// Returns `None` while the form is incomplete (unknown room, missing or
    /// non-positive dimensions). That is "no result yet", not a failure.
    pub fn calculate(
        room: RoomType,
        length_ft: f64,
        width_ft: f64,
        ceiling_height_ft: u32,
        bulb: BulbOption,
    ) -> Option<CalculationResult> {
        if !(length_ft > 0.0) || !(width_ft > 0.0) {
            return None;
        }

        let area_sq_ft = length_ft * width_ft;
        let area_sq_m = area_sq_ft * SQFT_TO_SQM;
        let base_lumens = area_sq_m * f64::from(room.lux_required());

        let adjusted_lumens = base_lumens * Self::height_multiplier(ceiling_height_ft);

        // Positive area and a positive lux target guarantee at least one bulb
        let bulbs_needed = ((adjusted_lumens / f64::from(bulb.lumens)).ceil() as u32).max(1);

        let incandescent_watts = bulbs_needed * INCANDESCENT_WATTS_PER_BULB;
        let led_watts = bulbs_needed * bulb.watts;
        let energy_saved_percent = ((f64::from(incandescent_watts - led_watts)
            / f64::from(incandescent_watts))
            * 100.0)
            .round() as u32;

        let monthly_cost_led = Self::monthly_cost(led_watts);
        let monthly_cost_incandescent = Self::monthly_cost(incandescent_watts);
        let monthly_savings = monthly_cost_incandescent - monthly_cost_led;

        Some(CalculationResult {
            area_sq_ft,
            total_lumens_needed: adjusted_lumens.round() as u32,
            bulbs_needed,
            energy_saved_percent,
            monthly_cost_led,
            monthly_cost_incandescent,
            monthly_savings,
            yearly_savings: monthly_savings * 12,
        })
    }

    /// Convenience wrapper taking the raw form values
    pub fn calculate_for_id(
        room_type_id: &str,
        length_ft: f64,
        width_ft: f64,
        ceiling_height_ft: u32,
        bulb: BulbOption,
    ) -> Option<CalculationResult> {
        let room = RoomType::from_id(room_type_id)?;
        Self::calculate(room, length_ft, width_ft, ceiling_height_ft, bulb)
    }

    /// Higher ceilings need more light to hit the same lux at floor level
    ///
    /// Thresholds are exclusive: exactly 10 or 12 feet takes the lower tier.
    fn height_multiplier(ceiling_height_ft: u32) -> f64 {
        if ceiling_height_ft > 12 {
            1.4
        } else if ceiling_height_ft > 10 {
            1.2
        } else {
            1.0
        }
    }

    /// Monthly running cost for a total wattage, rounded to whole units
    fn monthly_cost(watts: u32) -> u32 {
        (f64::from(watts) * HOURS_PER_MONTH / 1000.0 * RATE_PER_KWH).round() as u32
    }
}
