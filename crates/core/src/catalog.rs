//! Built-in rotation content: ward decks, skills-lab tracks and the library.
//!
//! Everything here goes through the same validation as user-supplied decks.

use crate::error::Error;
use crate::model::{
    Case, CaseDraft, Deck, DeckId, LibraryResource, RoundKind, Sex, TrainingClip, TrainingTrack,
};

pub const ADULT_DECK_ID: DeckId = DeckId::new(1);
pub const PAEDIATRIC_DECK_ID: DeckId = DeckId::new(2);

#[allow(clippy::too_many_arguments)]
fn draft(
    id: &str,
    title: &str,
    patient_name: &str,
    age: u16,
    sex: Sex,
    vignette: &str,
    options: &[&str],
    audio: Option<&str>,
    feedback_correct: &str,
    feedback_wrong: &str,
) -> CaseDraft {
    CaseDraft {
        id: id.to_string(),
        title: title.to_string(),
        patient_name: patient_name.to_string(),
        age,
        sex,
        vignette: vignette.to_string(),
        options: options.iter().map(|o| (*o).to_string()).collect(),
        correct_index: 0,
        audio: audio.map(str::to_string),
        feedback_correct: feedback_correct.to_string(),
        feedback_wrong: feedback_wrong.to_string(),
    }
}

fn validate_all(drafts: Vec<CaseDraft>) -> Result<Vec<Case>, Error> {
    drafts
        .into_iter()
        .map(|d| d.validate().map_err(Error::from))
        .collect()
}

/// Adult ward round (Ward Round I).
///
/// # Errors
///
/// Returns `Error` if the built-in content fails validation.
pub fn adult_ward_round() -> Result<Deck, Error> {
    let cases = validate_all(vec![
        draft(
            "adult-1",
            "Adult Case 1",
            "Mateo Santos",
            22,
            Sex::Male,
            "22-year-old male for pre-military assessment. Previously active (hockey), currently less active; no cardiovascular symptoms. Family history unremarkable. BMI 28, HR 70 regular, BP 122/80. Pulses and precordial impulse normal. Auscultation in the usual areas; this recording is from the left upper sternal edge.",
            &["Normal", "Innocent murmur", "Mitral stenosis", "Aortic stenosis"],
            Some("/assets/audio/adultCASE1.mp3"),
            "Correct: Normal S1/S2 with a physiologic split of S2; no murmurs. Use this as your baseline reference.",
            "Hint: A normal exam has no murmurs or extra sounds. Compare intensity/timing against this baseline.",
        ),
        draft(
            "adult-2",
            "Adult Case 2",
            "Lilly Montana",
            20,
            Sex::Female,
            "20-year-old female with routine work assessment. Very active (cycles/jogs), asymptomatic. No CV risk factors; recalls being told of an 'extra sound' in childhood. BMI 23, HR 60 regular, BP 112/75. Pulses normal. Listen in standard areas, especially apical region with the bell.",
            &["Innocent murmur", "Mitral regurgitation", "VSD", "PDA"],
            Some("/assets/audio/adultCASE2.mp3"),
            "Correct: Innocent (functional) murmurs are soft, midsystolic, with no radiation and often diminish with standing/Valsalva.",
            "Hint: Innocent murmurs are mid-systolic, low grade, non-radiating, and often change with preload (e.g., standing).",
        ),
        draft(
            "adult-3",
            "Adult Case 3",
            "Li Wei",
            50,
            Sex::Female,
            "50-year-old woman with remote rheumatic-type illness as a teen. Active walker; mild DOE, a bit worse over the last year. BMI 24, exam otherwise normal with undisplaced apex. BP 125/80. Auscultate carefully at the apex for an opening snap and low-pitched diastolic rumble.",
            &["Mitral stenosis", "Aortic regurgitation", "Tricuspid regurgitation", "Aortic stenosis"],
            Some("/assets/audio/adultCASE3.mp3"),
            "Correct: Mitral stenosis. Opening snap after S2 with a low-pitched diastolic rumble at the apex (bell), louder in LLD.",
            "Hint: Focus at the apex with the bell; listen for an opening snap followed by a diastolic rumble.",
        ),
        draft(
            "adult-4",
            "Adult Case 4",
            "Seán O'Connor",
            40,
            Sex::Male,
            "40-year-old male, lobster fisherman; increasing fatigue and mild exertional breathlessness. Followed since childhood for a murmur. BMI 24, HR 60 regular, BP 125/75. Suprasternal notch and RUSE thrills; pulses somewhat increased. Listen at both upper sternal borders and apex. Recording from LSB, 3rd interspace.",
            &["Bicuspid AV with AS/AR", "Mitral valve prolapse", "VSD", "PDA"],
            Some("/assets/audio/adultCASE4.mp3"),
            "Correct: Bicuspid aortic valve with aortic stenosis and aortic regurgitation. Crescendo-decrescendo systolic murmur at right upper sternal border radiating to carotids; early diastolic decrescendo at left sternal border for aortic regurgitation. Ejection click suggests bicuspid valve.",
            "Hint: Check right upper sternal border for systolic ejection with carotid radiation; any early diastolic aortic regurgitation component at left sternal border strengthens the diagnosis.",
        ),
        draft(
            "adult-5",
            "Adult Case 5",
            "Oluwaseun Adeyemi",
            26,
            Sex::Male,
            "26-year-old male for police service. Healthy and highly active; no exertional symptoms. BMI 29. Childhood murmur without interventions. No family CV history. BP 122/82; pulses normal; apex not displaced. Focus auscultation at left lower sternal border and apical areas.",
            &["VSD", "MR", "TR", "AS"],
            Some("/assets/audio/adultCASE5.mp3"),
            "Correct: Ventricular septal defect. Harsh holosystolic murmur at the left lower sternal border, often with a palpable thrill; intensity increases with handgrip (↑ afterload).",
            "Hint: Listen at the left lower sternal border for a harsh holosystolic quality; afterload maneuvers (handgrip) intensify left-to-right shunts.",
        ),
        draft(
            "adult-6",
            "Adult Case 6",
            "Elena Petrova",
            30,
            Sex::Female,
            "30-year-old female referred for a new murmur. Generally well, low activity; occasional brief palpitations with two episodes of mild dizziness. Minimal caffeine, rare alcohol, no meds. BMI 20. Apex not displaced; pulses normal; BP 110/80. Auscultate across the precordium, especially at the apex for midsystolic click and late systolic murmur.",
            &["MVP with MR", "AR", "MS", "AS"],
            Some("/assets/audio/adultCASE6.mp3"),
            "Correct: Mitral valve prolapse with mitral regurgitation. Midsystolic click followed by a late systolic murmur at the apex; standing/↓ preload moves the click earlier and lengthens the murmur.",
            "Hint: Focus at the apex; maneuvers that reduce preload (standing) bring the click earlier and extend the murmur.",
        ),
        draft(
            "adult-7",
            "Adult Case 7",
            "Nikhil Kumar",
            30,
            Sex::Male,
            "30-year-old male referred for a murmur; recently immigrated. Lifelong good health; moderately active. BMI 24. BP 125/70; pulses easy to feel (possibly increased). Heart action not increased. Consider continuous machinery murmur and wide pulse pressure.",
            &["PDA", "ASD", "PS", "AS"],
            Some("/assets/audio/adultCASE7.mp3"),
            "Correct: PDA. Continuous \"machinery\" murmur (systole + diastole), best below the left clavicle; bounding pulses and wide pulse pressure.",
            "Hint: PDA is distinctive for being continuous through S2; listen in the left infraclavicular area and check pulse pressure.",
        ),
        draft(
            "adult-8",
            "Adult Case 8",
            "Isra",
            19,
            Sex::Female,
            "19-year-old female photographing her red house. She spots a cat, runs after it, and suddenly collapses. No prior medical history; occasional brief palpitations in the past. Family history notable for a cousin with 'heart problems' in youth. On exam: normal pulses, no focal neurology post-recovery. Required listening revealed a harsh crescendo-decrescendo systolic murmur along the left sternal border that increases with Valsalva/standing and decreases with squatting, suggestive of dynamic LVOT obstruction.",
            &[
                "Hypertrophic obstructive cardiomyopathy",
                "Aortic stenosis",
                "Mitral valve prolapse",
                "Pulmonary embolism",
            ],
            None,
            "Correct: Exertional syncope in a young person with a dynamic systolic murmur that increases with Valsalva is classic for hypertrophic obstructive cardiomyopathy.",
            "Hint: Dynamic murmurs that increase with Valsalva/standing and decrease with squatting point away from fixed outflow lesions and toward HOCM.",
        ),
    ])?;

    Ok(Deck::new(ADULT_DECK_ID, "Ward Round", RoundKind::Adult, cases)?)
}

/// Congenital heart disease round (Ward Round II).
///
/// # Errors
///
/// Returns `Error` if the built-in content fails validation.
pub fn paediatric_ward_round() -> Result<Deck, Error> {
    let cases = validate_all(vec![
        draft(
            "chd-1",
            "CHD Case 1",
            "Amira Hassan",
            4,
            Sex::Female,
            "4-year-old girl, no symptoms. Normal growth and development. A quiet child, not as active as some other children. Examination: normal pulses, heart action perhaps a little increased and maximal close to the left sternal edge. You listen at the left upper sternal edge.",
            &["Atrial septal defect", "Patent ductus arteriosus", "Ventricular septal defect", "Tetralogy of Fallot"],
            Some("/assets/audio/1-ASD.mp3"),
            "Correct: Atrial septal defect. Fixed split S2 and systolic flow murmur at the left upper sternal edge due to increased pulmonary flow.",
            "Hint: A fixed (non-varying) split of S2 with a flow murmur at the left upper sternal edge points to atrial septal defect.",
        ),
        draft(
            "chd-2",
            "CHD Case 2",
            "Diego Martínez",
            9,
            Sex::Male,
            "9-year-old boy, asymptomatic. Routine physical exam. Normal growth and development. Normal pulses and cardiac impulse. You listen at the left upper sternal border.",
            &["Pulmonary stenosis", "Atrial septal defect", "Ventricular septal defect", "Mitral regurgitation"],
            Some("/assets/audio/2-Pulmonary-stenosis.mp3"),
            "Correct: Pulmonary stenosis. Systolic ejection at the left upper sternal border with an ejection click; typically intensifies with inspiration.",
            "Hint: Right-sided ejection murmurs at the left upper sternal border often rise with inspiration; an ejection click supports pulmonary stenosis.",
        ),
        draft(
            "chd-3",
            "CHD Case 3",
            "Minh Nguyen",
            4,
            Sex::Male,
            "4-year-old boy, asymptomatic. Normal growth and development. On examination, slightly increased heart rate and bounding radial and femoral pulses. Heart action also slightly increased. You listen in the left upper sternal edge.",
            &["Patent ductus arteriosus", "Ventricular septal defect", "Atrial septal defect", "Coarctation of aorta"],
            Some("/assets/audio/3-PDA.mp3"),
            "Correct: Patent ductus arteriosus. Continuous \"machinery\" murmur beneath the left clavicle with bounding pulses and wide pulse pressure.",
            "Hint: A continuous murmur (systole + diastole) in the left infraclavicular area with bounding pulses suggests patent ductus arteriosus.",
        ),
        draft(
            "chd-4",
            "CHD Case 4",
            "Yusuf Ali",
            10,
            Sex::Male,
            "10-year-old with 10 days of fever, increased heart rate and bounding pulses. He looks tired and unwell. Normal past history for growth and development, no prior symptoms.",
            &["Aortic stenosis + Aortic regurgitation", "Patent ductus arteriosus", "Pulmonary stenosis", "Mitral regurgitation"],
            Some("/assets/audio/4-Aortic-stenosis-and-regurgitation.mp3"),
            "Correct: Aortic stenosis with regurgitation. Right upper sternal border ejection murmur radiating to carotids plus early diastolic decrescendo at left sternal border.",
            "Hint: Dual lesion clue: systolic ejection at the base with carotid radiation and a separate early diastolic aortic regurgitation murmur.",
        ),
        draft(
            "chd-5",
            "CHD Case 5",
            "Sofia Rossi",
            20,
            Sex::Female,
            "20-year-old female, no symptoms, good health. Routine physical examination. Normal heart action and pulses. You listen at the left upper sternal edge using the diaphragm of the stethoscope.",
            &["Normal", "Atrial septal defect", "Ventricular septal defect", "Patent ductus arteriosus"],
            Some("/assets/audio/5-Normal-sounds.mp3"),
            "Correct: Normal heart sounds. Clear S1/S2 without murmurs. Use as a normal baseline.",
            "Hint: No murmur or extra sounds; compare this normal timing and intensity to other clips.",
        ),
        draft(
            "chd-6",
            "CHD Case 6",
            "Noah Cohen",
            10,
            Sex::Male,
            "10-year-old boy. Normal growth and development. No symptoms, routine physical exam for competitive hockey. Normal body habitus. Normal pulses and heart action. You listen in all 4 areas; at the apex here are the sounds (some skin mic crackles present).",
            &["Bicuspid aortic valve", "Mitral valve prolapse", "Pulmonary stenosis", "Tricuspid regurgitation"],
            Some("/assets/audio/6-Bicuspid-aortic-valve.mp3"),
            "Correct: Bicuspid aortic valve. Ejection click and systolic ejection at the base (often right upper sternal border); apex may transmit.",
            "Hint: Seek an early systolic click followed by ejection murmur at the base; recordings may have minor artefact.",
        ),
        draft(
            "chd-7",
            "CHD Case 7",
            "Hiro Tanaka",
            4,
            Sex::Male,
            "4-year-old boy, completely healthy past history, very active without breathlessness or other cardiac symptoms. Slightly small for age (35th %ile). Heart action a bit increased along the left sternal edge; pulses normal. You listen at the left upper sternal edge.",
            &["Atrial septal defect", "Ventricular septal defect", "Patent ductus arteriosus", "Normal"],
            Some("/assets/audio/7-ASD.mp3"),
            "Correct: Atrial septal defect. Fixed split S2 with systolic flow murmur at the left upper sternal edge in an otherwise well child.",
            "Hint: In children, a fixed split S2 that does not vary with respiration is a classic atrial septal defect sign.",
        ),
        draft(
            "chd-8",
            "CHD Case 8",
            "Arjun Patel",
            7,
            Sex::Male,
            "Healthy 7-year-old boy. Normal growth and development, no symptoms. Routine physical exam. Normal heart action and pulses. You listen at the apical area using the stethoscope bell.",
            &["Innocent murmur + S3", "Ventricular septal defect", "Mitral regurgitation", "Aortic regurgitation"],
            Some("/assets/audio/8-Innocent-murmur-and-S3.mp3"),
            "Correct: Innocent vibratory Still's murmur at the left lower sternal border with a physiological S3 at the apex.",
            "Hint: A musical/vibratory left lower sternal border murmur with a physiological S3 in a healthy child is typically benign.",
        ),
        draft(
            "chd-9",
            "CHD Case 9",
            "Mia Novak",
            7,
            Sex::Female,
            "7-year-old girl, normal growth and development, no symptoms. Normal heart action and pulses. Routine examination. You listen at the left sternal edge, 4th interspace.",
            &["Ventricular septal defect", "Atrial septal defect", "Patent ductus arteriosus", "Mitral regurgitation"],
            Some("/assets/audio/9-VSD.mp3"),
            "Correct: Ventricular septal defect. Harsh holosystolic murmur at the left lower sternal edge; often palpable thrill.",
            "Hint: Holosystolic timing at the left lower sternal border is typical for ventricular septal defect; palpate for a thrill to support the diagnosis.",
        ),
    ])?;

    Ok(Deck::new(
        PAEDIATRIC_DECK_ID,
        "Paeds Ward",
        RoundKind::Paediatric,
        cases,
    )?)
}

/// Built-in deck for a round kind.
///
/// # Errors
///
/// Returns `Error` if the built-in content fails validation.
pub fn ward_round(kind: RoundKind) -> Result<Deck, Error> {
    match kind {
        RoundKind::Adult => adult_ward_round(),
        RoundKind::Paediatric => paediatric_ward_round(),
    }
}

/// Skills-lab reference recordings for a track.
#[must_use]
pub fn training_clips(track: TrainingTrack) -> Vec<TrainingClip> {
    match track {
        TrainingTrack::Adult => vec![
            TrainingClip::new("Normal heart sounds", "/assets/audio/adultCASE1.mp3", &[
                "Physiological split of S2 varies with inspiration",
                "No added sounds or murmurs; PMI non-displaced",
                "Use as a baseline to compare intensity, timing and quality",
            ]),
            TrainingClip::new("Innocent (functional) flow murmur", "/assets/audio/adultCASE2.mp3", &[
                "Soft, midsystolic, grade ≤2/6; best at LLSB or apex",
                "Often decreases with standing/Valsalva; increases with supine state",
                "No radiation; normal S2; normal examination otherwise",
            ]),
            TrainingClip::new("Mitral valve stenosis", "/assets/audio/adultCASE3.mp3", &[
                "Opening snap after S2 (shorter A2-OS when severe)",
                "Low-pitched diastolic rumble at the apex (bell), louder in LLD",
                "Loud S1; consider rheumatic aetiology in appropriate context",
            ]),
            TrainingClip::new(
                "Bicuspid aortic valve with aortic stenosis and regurgitation",
                "/assets/audio/adultCASE4.mp3",
                &[
                    "Crescendo-decrescendo systolic murmur at right upper sternal border radiating to the carotids (aortic stenosis)",
                    "Early diastolic decrescendo at left sternal border (aortic regurgitation component)",
                    "Ejection click suggests a bicuspid valve; check for unequal pulses",
                ],
            ),
            TrainingClip::new("Ventricular septal defect", "/assets/audio/adultCASE5.mp3", &[
                "Harsh pansystolic murmur at the LLSB; often with a palpable thrill",
                "Intensity may increase with handgrip (↑ afterload)",
                "Smaller restrictive defects can be louder; assess for RV volume/pressure load",
            ]),
            TrainingClip::new(
                "Mitral valve prolapse with mitral regurgitation",
                "/assets/audio/adultCASE6.mp3",
                &[
                    "Midsystolic click followed by a late systolic murmur at the apex",
                    "Standing/↓ preload moves the click earlier and lengthens the murmur",
                    "Axillary radiation if significant mitral regurgitation; consider Marfan/EDS context if syndromic",
                ],
            ),
            TrainingClip::new("Patent ductus arteriosus", "/assets/audio/adultCASE7.mp3", &[
                "Continuous \"machinery\" murmur (systole + diastole) beneath the left clavicle",
                "Bounding pulses with wide pulse pressure",
                "Consider differential: AV fistulae can also produce continuous murmurs",
            ]),
        ],
        TrainingTrack::Paediatric => vec![
            TrainingClip::new("Atrial septal defect", "/assets/audio/1-ASD.mp3", &[
                "Fixed split S2 (little respiratory variation)",
                "Systolic ejection flow murmur at the left upper sternal border from ↑ pulmonary flow",
                "Parasternal impulse may be prominent with right ventricular volume load",
            ]),
            TrainingClip::new("Pulmonary valve stenosis", "/assets/audio/2-Pulmonary-stenosis.mp3", &[
                "Systolic ejection murmur at left upper sternal border with an ejection click",
                "Murmur may increase with inspiration (right-sided)",
                "Assess for thrill at the upper left sternal border",
            ]),
            TrainingClip::new("Patent ductus arteriosus", "/assets/audio/3-PDA.mp3", &[
                "Continuous \"machinery\" murmur under the left clavicle",
                "Bounding pulses; wide pulse pressure",
                "Differentiate from venous hum and arteriovenous fistulae",
            ]),
            TrainingClip::new(
                "Aortic stenosis and regurgitation",
                "/assets/audio/4-Aortic-stenosis-and-regurgitation.mp3",
                &[
                    "Right upper sternal border ejection murmur radiating to the carotids (aortic stenosis)",
                    "Early diastolic decrescendo at the left sternal border (aortic regurgitation)",
                    "Evaluate pulses and blood pressure for severity",
                ],
            ),
            TrainingClip::new("Normal heart sounds", "/assets/audio/5-Normal-sounds.mp3", &[
                "Normal S1/S2 without murmurs",
                "No clicks or extra heart sounds",
                "Use as a paediatric baseline reference",
            ]),
            TrainingClip::new("Bicuspid aortic valve", "/assets/audio/6-Bicuspid-aortic-valve.mp3", &[
                "Ejection click; systolic ejection murmur at the base (often right upper sternal border)",
                "Variable severity; may progress over time",
                "Screen first-degree relatives if clinically indicated",
            ]),
            TrainingClip::new("Atrial septal defect", "/assets/audio/7-ASD.mp3", &[
                "Fixed split S2",
                "Flow murmur at left upper sternal border from ↑ pulmonary flow",
                "Electrocardiogram may show right axis/right ventricular conduction delay in secundum atrial septal defect",
            ]),
            TrainingClip::new(
                "Innocent Still's murmur with physiological S3",
                "/assets/audio/8-Innocent-murmur-and-S3.mp3",
                &[
                    "Soft, musical/vibratory left lower sternal border murmur in healthy child",
                    "Physiological S3 at the apex can be normal in children",
                    "No pathological signs: growth, pulses and exam otherwise normal",
                ],
            ),
            TrainingClip::new("Ventricular septal defect", "/assets/audio/9-VSD.mp3", &[
                "Harsh holosystolic murmur at the left lower sternal border; possible thrill",
                "Smaller restrictive defects can be loud; consider heart failure signs if large",
                "Handgrip may increase intensity by ↑ afterload",
            ]),
        ],
    }
}

/// Consultant's library reading list.
///
/// # Errors
///
/// Returns `Error` if a built-in resource URL fails to parse.
pub fn library_resources() -> Result<Vec<LibraryResource>, Error> {
    let raw = [
        (
            "British Society of Echocardiography Guidelines",
            "Comprehensive guidelines for cardiac assessment and echocardiography in the UK.",
            "https://www.bsecho.org/",
            "Clinical Guidelines",
        ),
        (
            "NICE Clinical Knowledge Summaries - Heart Murmurs",
            "Evidence-based guidance on assessment and management of heart murmurs in primary care.",
            "https://cks.nice.org.uk/topics/heart-murmurs/",
            "Clinical Guidelines",
        ),
        (
            "University of Washington Heart Sounds",
            "Interactive heart sounds library with high-quality audio recordings and clinical correlations.",
            "https://depts.washington.edu/physdx/heart/demo.html",
            "Audio Resources",
        ),
        (
            "British Heart Foundation - Heart Conditions",
            "Patient-friendly explanations of cardiac conditions with medical professional resources.",
            "https://www.bhf.org.uk/informationsupport/conditions",
            "Educational",
        ),
        (
            "CardioNet - ECG Learning",
            "Comprehensive ECG interpretation resources with case studies and interactive modules.",
            "https://www.ecglibrary.com/",
            "ECG Resources",
        ),
        (
            "Medscape Cardiology",
            "Latest cardiology news, clinical updates, and educational content for medical professionals.",
            "https://www.medscape.com/cardiology",
            "Clinical Updates",
        ),
        (
            "European Society of Cardiology Guidelines",
            "International guidelines for cardiovascular disease prevention and management.",
            "https://www.escardio.org/Guidelines",
            "Clinical Guidelines",
        ),
        (
            "Teaching Heart Auscultation",
            "Dedicated platform for learning cardiac auscultation with audio files and clinical cases.",
            "https://teachingheartauscultation.com/",
            "Audio Resources",
        ),
        (
            "BMJ Learning - Cardiology",
            "Evidence-based learning modules on cardiovascular medicine and examination techniques.",
            "https://learning.bmj.com/",
            "Educational",
        ),
    ];

    raw.into_iter()
        .map(|(title, description, url, category)| {
            LibraryResource::new(title, description, url, category).map_err(Error::from)
        })
        .collect()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
