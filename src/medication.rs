use serde::Deserialize;

/// One medication regimen: how long to wait after waking up, how often to
/// repeat, and how many doses a day holds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MedicationSchedule {
    pub name: String,
    pub interval_minutes: u32,
    pub repeat_count: u32,
    pub delay_minutes: u32,
}

impl MedicationSchedule {
    pub fn new(
        name: impl Into<String>,
        interval_minutes: u32,
        repeat_count: u32,
        delay_minutes: u32,
    ) -> Self {
        Self {
            name: name.into(),
            interval_minutes,
            repeat_count,
            delay_minutes,
        }
    }
}

/// The day's regimens, grouped the way they are shown: eye drops first,
/// then oral medications. Dispatch order is eye drops followed by oral,
/// each in list order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MedicationBook {
    pub eye_drops: Vec<MedicationSchedule>,
    pub oral: Vec<MedicationSchedule>,
}

impl MedicationBook {
    pub fn all(&self) -> impl Iterator<Item = &MedicationSchedule> {
        self.eye_drops.iter().chain(self.oral.iter())
    }

    pub fn dose_count(&self) -> usize {
        self.all().map(|med| med.repeat_count as usize).sum()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        for med in self.all() {
            anyhow::ensure!(
                med.interval_minutes > 0,
                "Medication \"{}\" must have a positive dose interval",
                med.name
            );
        }

        Ok(())
    }
}

impl Default for MedicationBook {
    fn default() -> Self {
        Self {
            eye_drops: vec![
                MedicationSchedule::new("Cyporin-N", 4 * 60, 4, 0),
                MedicationSchedule::new("Pred Forte", 2 * 60, 6, 10),
                MedicationSchedule::new("Cravit", 8 * 60, 2, 25),
            ],
            oral: vec![
                MedicationSchedule::new("Oral med A (3x daily)", 6 * 60, 3, 15),
                MedicationSchedule::new("Blood pressure pills (1x daily)", 24 * 60, 1, 5),
            ],
        }
    }
}
