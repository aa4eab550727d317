/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Enumerations accepted by the note generation endpoints
//!
//! Every value serializes to the exact camelCase string the API expects and
//! parses back from it, failing with [`AppError::InvalidField`] on anything
//! outside the allowed set.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! api_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every accepted value, in wire order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire representation of the value
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            /// Parses a wire value, naming `field` in the error
            pub fn parse_field(value: &str, field: &str) -> Result<Self, AppError> {
                match value {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(AppError::invalid_field(
                        field,
                        format!(
                            "Invalid value for {field}. Must be one of: {}",
                            [$($wire),+].join(", ")
                        ),
                    )),
                }
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse_field(s, $field)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

api_enum! {
    /// Kind of patient encounter being documented
    VisitType, "visit_type" {
        /// First visit with the patient
        InitialEncounter => "initialEncounter",
        /// Follow-up on a previous visit
        FollowUp => "followUp",
    }
}

api_enum! {
    /// How the audio was captured
    RecordingType, "recording_type" {
        /// Single clinician dictating
        Dictation => "dictation",
        /// Clinician and patient conversation
        Conversation => "conversation",
    }
}

api_enum! {
    /// Note template used for generation
    Template, "template" {
        PrimaryCare => "primaryCare",
        Er => "er",
        Psychiatry => "psychiatry",
        SurgicalSpecialties => "surgicalSpecialties",
        MedicalSpecialties => "medicalSpecialties",
        Nursing => "nursing",
        Radiology => "radiology",
        Pharmacy => "pharmacy",
        Procedures => "procedures",
        Letter => "letter",
        Social => "social",
        /// Word for word transcription
        Wfw => "wfw",
        SmartInsert => "smartInsert",
    }
}

api_enum! {
    /// Spoken language of the recording, or language of the generated note
    Language, "lang" {
        /// English
        En => "en",
        /// French
        Fr => "fr",
    }
}

api_enum! {
    /// Layout of the generated note
    DocumentationStyle, "documentation_style" {
        /// Subjective, objective, assessment, plan
        Soap => "soap",
        /// One section per problem
        ProblemBased => "problemBased",
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::En
    }
}
