//! Static reference data: echo types, categories, severities, valve types,
//! time intervals, surveillance intervals and billing codes.

use serde::{Deserialize, Serialize};

/// Type of echocardiogram being requested.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum EchoType {
    Initial,
    Valvular,
    Prosthetic,
    Intervention,
    HeartFailure,
    Congenital,
    Pericardial,
    Chemo,
    Preop,
    Other,
}

impl EchoType {
    pub const ALL: [EchoType; 10] = [
        EchoType::Initial,
        EchoType::Valvular,
        EchoType::Prosthetic,
        EchoType::Intervention,
        EchoType::HeartFailure,
        EchoType::Congenital,
        EchoType::Pericardial,
        EchoType::Chemo,
        EchoType::Preop,
        EchoType::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EchoType::Initial => "Initial Assessment",
            EchoType::Valvular => "Valvular Heart Disease",
            EchoType::Prosthetic => "Prosthetic Valves",
            EchoType::Intervention => "Structural Intervention",
            EchoType::HeartFailure => "Heart Failure",
            EchoType::Congenital => "Congenital Heart Disease",
            EchoType::Pericardial => "Pericardial Disease",
            EchoType::Chemo => "Cardio-oncology",
            EchoType::Preop => "Pre-operative Assessment",
            EchoType::Other => "Other",
        }
    }

    /// Categories offered for this echo type, in display order.
    pub fn categories(self) -> &'static [EchoCategory] {
        use EchoCategory::*;
        match self {
            EchoType::Initial => &[InitialEvaluation, AcuteCondition, Arrhythmia],
            EchoType::Valvular => &[AorticValve, MitralValve, OtherValve],
            EchoType::Prosthetic => &[MechanicalValve, BioValve, PostSurgery],
            EchoType::Intervention => &[PreProcedure, PostProcedure],
            EchoType::HeartFailure => &[NewHeartFailure, KnownHeartFailure, DeviceOptimization],
            EchoType::Congenital => &[
                AtrialSeptalDefect,
                VentricularSeptalDefect,
                OtherCongenital,
            ],
            EchoType::Pericardial => &[Pericarditis, PericardialEffusion],
            EchoType::Chemo => &[Baseline, Surveillance],
            EchoType::Preop => &[CardiacSurgery, NonCardiacSurgery],
            EchoType::Other => &[OtherIndication],
        }
    }

    /// Medicare item number for this echo type, if one applies.
    ///
    /// Valvular studies split by referrer: rural GPs bill under their own item.
    pub fn billing_code(self, referring_doctor: Option<ReferringDoctor>) -> Option<&'static str> {
        match self {
            EchoType::Initial => Some(BILLING_INITIAL),
            EchoType::Valvular => match referring_doctor {
                Some(ReferringDoctor::GpRural) => Some(BILLING_VALVULAR_GP_RURAL),
                _ => Some(BILLING_VALVULAR_SPECIALIST),
            },
            EchoType::HeartFailure => Some(BILLING_HEART_FAILURE),
            _ => None,
        }
    }
}

pub const BILLING_INITIAL: &str = "55126";
pub const BILLING_VALVULAR_SPECIALIST: &str = "55127";
pub const BILLING_VALVULAR_GP_RURAL: &str = "55128";
pub const BILLING_HEART_FAILURE: &str = "55129";

/// Clinical category within an echo type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EchoCategory {
    InitialEvaluation,
    AcuteCondition,
    Arrhythmia,
    AorticValve,
    MitralValve,
    OtherValve,
    MechanicalValve,
    BioValve,
    PostSurgery,
    PreProcedure,
    PostProcedure,
    NewHeartFailure,
    KnownHeartFailure,
    DeviceOptimization,
    AtrialSeptalDefect,
    VentricularSeptalDefect,
    OtherCongenital,
    Pericarditis,
    PericardialEffusion,
    Baseline,
    Surveillance,
    CardiacSurgery,
    NonCardiacSurgery,
    OtherIndication,
}

impl EchoCategory {
    /// The echo type that owns this category.
    pub fn echo_type(self) -> EchoType {
        use EchoCategory::*;
        match self {
            InitialEvaluation | AcuteCondition | Arrhythmia => EchoType::Initial,
            AorticValve | MitralValve | OtherValve => EchoType::Valvular,
            MechanicalValve | BioValve | PostSurgery => EchoType::Prosthetic,
            PreProcedure | PostProcedure => EchoType::Intervention,
            NewHeartFailure | KnownHeartFailure | DeviceOptimization => EchoType::HeartFailure,
            AtrialSeptalDefect | VentricularSeptalDefect | OtherCongenital => EchoType::Congenital,
            Pericarditis | PericardialEffusion => EchoType::Pericardial,
            Baseline | Surveillance => EchoType::Chemo,
            CardiacSurgery | NonCardiacSurgery => EchoType::Preop,
            OtherIndication => EchoType::Other,
        }
    }

    pub fn label(self) -> &'static str {
        use EchoCategory::*;
        match self {
            InitialEvaluation => "Initial Cardiovascular Evaluation",
            AcuteCondition => "Acute Cardiac Conditions",
            Arrhythmia => "Arrhythmias",
            AorticValve => "Aortic Valve Disease",
            MitralValve => "Mitral Valve Disease",
            OtherValve => "Other Valve Disease",
            MechanicalValve => "Mechanical Valve",
            BioValve => "Bioprosthetic Valve",
            PostSurgery => "Post-Cardiac Surgery",
            PreProcedure => "Pre-Procedure Assessment",
            PostProcedure => "Post-Procedure Assessment",
            NewHeartFailure => "New Heart Failure",
            KnownHeartFailure => "Known Heart Failure",
            DeviceOptimization => "Device Optimization",
            AtrialSeptalDefect => "Atrial Septal Defect",
            VentricularSeptalDefect => "Ventricular Septal Defect",
            OtherCongenital => "Other Congenital Heart Disease",
            Pericarditis => "Pericarditis",
            PericardialEffusion => "Pericardial Effusion",
            Baseline => "Baseline Assessment",
            Surveillance => "Surveillance",
            CardiacSurgery => "Cardiac Surgery",
            NonCardiacSurgery => "Non-Cardiac Surgery",
            OtherIndication => "Other Indication",
        }
    }
}

/// Who is requesting the study.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReferringDoctor {
    Gp,
    GpRural,
    Cardiologist,
    NonCardiologySpecialist,
    ConsultantPhysician,
}

impl ReferringDoctor {
    pub fn label(self) -> &'static str {
        match self {
            ReferringDoctor::Gp => "General Practitioner",
            ReferringDoctor::GpRural => "General Practitioner (Rural - MMM 3 to 7)",
            ReferringDoctor::Cardiologist => "Cardiologist",
            ReferringDoctor::NonCardiologySpecialist => "Non-Cardiology Specialist",
            ReferringDoctor::ConsultantPhysician => "Consultant Physician",
        }
    }
}

/// Urgency bucket for the study.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TimeInterval {
    Immediate,
    Urgent24h,
    Urgent48h,
    Prompt,
    Routine,
}

impl TimeInterval {
    pub fn label(self) -> &'static str {
        match self {
            TimeInterval::Immediate => "Immediate (within hours)",
            TimeInterval::Urgent24h => "Urgent (within 24 hours)",
            TimeInterval::Urgent48h => "Urgent (within 48 hours)",
            TimeInterval::Prompt => "Prompt (within 2-4 weeks)",
            TimeInterval::Routine => "Routine (2-4 weeks)",
        }
    }

    pub fn is_urgent(self) -> bool {
        matches!(
            self,
            TimeInterval::Immediate | TimeInterval::Urgent24h | TimeInterval::Urgent48h
        )
    }
}

/// Care setting for the study.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PatientType {
    Inpatient,
    Outpatient,
}

impl PatientType {
    pub fn label(self) -> &'static str {
        match self {
            PatientType::Inpatient => "Inpatient",
            PatientType::Outpatient => "Outpatient",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ValveSeverity {
    Mild,
    Moderate,
    Severe,
}

impl ValveSeverity {
    pub fn label(self) -> &'static str {
        match self {
            ValveSeverity::Mild => "Mild",
            ValveSeverity::Moderate => "Moderate",
            ValveSeverity::Severe => "Severe",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ValveType {
    AorticStenosis,
    AorticRegurgitation,
    MitralStenosis,
    MitralRegurgitation,
    TricuspidRegurgitation,
    TricuspidStenosis,
    PulmonicRegurgitation,
    PulmonicStenosis,
    MultipleValve,
}

impl ValveType {
    pub const ALL: [ValveType; 9] = [
        ValveType::AorticStenosis,
        ValveType::AorticRegurgitation,
        ValveType::MitralStenosis,
        ValveType::MitralRegurgitation,
        ValveType::TricuspidRegurgitation,
        ValveType::TricuspidStenosis,
        ValveType::PulmonicRegurgitation,
        ValveType::PulmonicStenosis,
        ValveType::MultipleValve,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ValveType::AorticStenosis => "Aortic Stenosis (AS)",
            ValveType::AorticRegurgitation => "Aortic Regurgitation (AR)",
            ValveType::MitralStenosis => "Mitral Stenosis (MS)",
            ValveType::MitralRegurgitation => "Mitral Regurgitation (MR)",
            ValveType::TricuspidRegurgitation => "Tricuspid Regurgitation (TR)",
            ValveType::TricuspidStenosis => "Tricuspid Stenosis (TS)",
            ValveType::PulmonicRegurgitation => "Pulmonic Regurgitation (PR)",
            ValveType::PulmonicStenosis => "Pulmonic Stenosis (PS)",
            ValveType::MultipleValve => "Multiple valve disease",
        }
    }
}

/// Recommended spacing between surveillance studies.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SurveillanceInterval {
    pub min_months: u32,
    pub max_months: u32,
    pub label: &'static str,
}

const THREE_TO_FIVE_YEARLY: SurveillanceInterval = SurveillanceInterval {
    min_months: 36,
    max_months: 60,
    label: "3-5 yearly",
};

const ONE_TO_TWO_YEARLY: SurveillanceInterval = SurveillanceInterval {
    min_months: 12,
    max_months: 24,
    label: "1-2 yearly",
};

const SIX_TO_TWELVE_MONTHLY: SurveillanceInterval = SurveillanceInterval {
    min_months: 6,
    max_months: 12,
    label: "6-12 monthly",
};

const ANNUALLY: SurveillanceInterval = SurveillanceInterval {
    min_months: 12,
    max_months: 12,
    label: "Annually",
};

/// Surveillance interval for a valve lesion, or `None` when no
/// recommendation exists for the pair.
pub fn surveillance_interval(
    valve_type: ValveType,
    severity: ValveSeverity,
) -> Option<SurveillanceInterval> {
    use ValveSeverity::*;
    use ValveType::*;
    let interval = match (valve_type, severity) {
        (AorticStenosis | AorticRegurgitation | MitralStenosis | MitralRegurgitation, Mild) => {
            THREE_TO_FIVE_YEARLY
        }
        (
            AorticStenosis | AorticRegurgitation | MitralStenosis | MitralRegurgitation,
            Moderate,
        ) => ONE_TO_TWO_YEARLY,
        (MitralStenosis, Severe) => ANNUALLY,
        (AorticStenosis | AorticRegurgitation | MitralRegurgitation, Severe) => {
            SIX_TO_TWELVE_MONTHLY
        }
        _ => return None,
    };
    Some(interval)
}
