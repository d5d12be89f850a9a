//! Demo inventory seeding.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use toolcrib_core::error::AppError;
use toolcrib_core::result::AppResult;
use toolcrib_database::store::InventoryStore;
use toolcrib_entity::tool::CreateTool;
use toolcrib_entity::tool_type::CreateToolType;
use toolcrib_entity::user::CreateUser;

const TOOL_TYPES: &[(&str, &str)] = &[
    ("Drilling Bits", "Fixed cutter and roller cone drill bits for various formations"),
    ("Measurement While Drilling (MWD)", "Real-time downhole measurement tools for directional data"),
    ("Logging While Drilling (LWD)", "Formation evaluation tools that measure petrophysical properties"),
    ("Directional Drilling Tools", "Bent housing motors, rotary steerable systems for wellbore navigation"),
    ("Downhole Motors", "Positive displacement motors for directional drilling"),
    ("Stabilizers", "Blades and sleeve stabilizers for wellbore stability"),
    ("Reamers", "Hole enlargement tools and back reamers"),
    ("Drill Pipe", "Heavy weight drill pipe and drill collars"),
    ("Mud Motors", "Turbodrilling motors and performance motors"),
    ("Survey Instruments", "Multi-shot and single-shot survey tools"),
];

const USERS: &[(&str, &str, &str, &str)] = &[
    ("john_kamau", "John Kamau", "john.kamau@gmail.com", "drilling_engineer"),
    ("prince_kibali", "Prince Kibali", "prince.kibali@gmail.com", "mwd_technician"),
    ("simon_njoroge", "Simon Njoroge", "simon.njoroge@gmail.com", "tool_push"),
    ("edwin_omondi", "Edwin Omondi", "edwin.omondi@gmail.com", "mud_engineer"),
    ("ann_kwamboka", "Ann Kwamboka", "ann.kwamboka@gmail.com", "rig_manager"),
];

/// (name, serial number, index into `TOOL_TYPES`, location)
const TOOLS: &[(&str, &str, usize, &str)] = &[
    ("PDC Bit 8.5\"", "MWDBIT-001", 0, "Drill Bits Storage"),
    ("Tricone Bit 12.25\"", "MWDBIT-002", 0, "Drill Bits Storage"),
    ("PDC Bit 6\"", "MWDBIT-003", 0, "Drill Bits Storage"),
    ("PowerPulse MWD System", "MWDSYS-001", 1, "MWD Electronics Bay"),
    ("TeleScope MWD Tool", "MWDSYS-002", 1, "MWD Electronics Bay"),
    ("SlimPulse MWD", "MWDSYS-003", 1, "MWD Electronics Bay"),
    ("EcoScope Multiple Propagation Resistivity", "LWDTOOL-001", 2, "LWD Tool Storage"),
    ("SonicVision Sonic Tool", "LWDTOOL-002", 2, "LWD Tool Storage"),
    ("Azimuthal Litho-Density Tool", "LWDTOOL-003", 2, "LWD Tool Storage"),
    ("Navi-Drill RSS", "DDSYS-001", 3, "Directional Tools Bay"),
    ("PowerDrive RSS", "DDSYS-002", 3, "Directional Tools Bay"),
    ("AutoTrak RSS", "DDSYS-003", 3, "Directional Tools Bay"),
    ("Hamilton Motor 8\"", "DHMOTOR-001", 4, "Downhole Motors Storage"),
    ("Navi-Drill X-treme Motor", "DHMOTOR-002", 4, "Downhole Motors Storage"),
    ("PowerPak Motor", "DHMOTOR-003", 4, "Downhole Motors Storage"),
    ("Spiral Blade Stabilizer 8.5\"", "STABIL-001", 5, "Stabilizers Storage"),
    ("Integral Blade Stabilizer", "STABIL-002", 5, "Stabilizers Storage"),
    ("String Stabilizer", "STABIL-003", 5, "Stabilizers Storage"),
];

/// What a seeding run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    /// Tool types inserted.
    pub tool_types: usize,
    /// Users inserted.
    pub users: usize,
    /// Tools inserted.
    pub tools: usize,
}

impl SeedSummary {
    /// Whether anything was inserted.
    pub fn is_empty(&self) -> bool {
        self.tool_types == 0 && self.users == 0 && self.tools == 0
    }
}

/// Installs the demo MWD inventory into an empty store.
#[derive(Debug, Clone)]
pub struct Seeder {
    store: Arc<dyn InventoryStore>,
}

impl Seeder {
    /// Creates a new seeder.
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Seed the demo inventory unless a tool type already exists.
    pub async fn seed_if_empty(&self) -> AppResult<SeedSummary> {
        if !self.store.list_tool_types().await?.is_empty() {
            info!("Inventory already has tool types, skipping seed");
            return Ok(SeedSummary::default());
        }

        let mut summary = SeedSummary::default();

        let mut type_ids = Vec::with_capacity(TOOL_TYPES.len());
        for (name, description) in TOOL_TYPES {
            let tool_type = self
                .store
                .create_tool_type(&CreateToolType {
                    name: (*name).to_string(),
                    description: Some((*description).to_string()),
                })
                .await?;
            type_ids.push(tool_type.id);
            summary.tool_types += 1;
        }

        for (username, full_name, email, role) in USERS {
            self.store
                .create_user(&CreateUser {
                    username: (*username).to_string(),
                    full_name: Some((*full_name).to_string()),
                    email: Some((*email).to_string()),
                    role: (*role).to_string(),
                })
                .await?;
            summary.users += 1;
        }

        let now = Utc::now();
        for (name, serial_number, type_index, location) in TOOLS {
            let type_id = type_ids.get(*type_index).copied().ok_or_else(|| {
                AppError::internal(format!("Seed tool {serial_number} has no tool type"))
            })?;
            self.store
                .create_tool(
                    &CreateTool {
                        name: (*name).to_string(),
                        serial_number: (*serial_number).to_string(),
                        type_id: Some(type_id),
                        location: Some((*location).to_string()),
                    },
                    now,
                )
                .await?;
            summary.tools += 1;
        }

        info!(
            tool_types = summary.tool_types,
            users = summary.users,
            tools = summary.tools,
            "Seeded demo MWD inventory"
        );
        Ok(summary)
    }
}
