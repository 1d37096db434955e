//! Photorealistic studio request and its prompt compilation.
//!
//! The master prompt is assembled in a fixed section order: subject/action,
//! environment, profile consistency, equipment, lighting and atmosphere,
//! depth of field, narrative, style, film emulation, exclusions, output
//! quality. The external model is sensitive to instruction sequence, so the
//! order is part of the behavior.

use serde::{Deserialize, Serialize};

use crate::media::UploadedImage;
use crate::prompts::humanize;

/// Moment of the day driving the scene's ambient light
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeOfDay {
    #[serde(rename = "amanhecer")]
    Amanhecer,
    #[serde(rename = "meio-dia")]
    MeioDia,
    #[serde(rename = "por_do_sol")]
    PorDoSol,
    #[serde(rename = "hora_azul")]
    HoraAzul,
    #[serde(rename = "noite")]
    Noite,
}

/// Main light source simulated in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightSource {
    NaturalDaylight,
    GoldenHourSun,
    StudioFlash,
    RingLight,
    NeonCity,
    DramaticSpotlight,
    TungstenBulb,
    FluorescentLight,
    LedPanel,
    Candlelight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightQuality {
    Difusa,
    Dura,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightAngle {
    #[serde(rename = "frontal")]
    Frontal,
    #[serde(rename = "lateral")]
    Lateral,
    #[serde(rename = "contra-luz")]
    ContraLuz,
    #[serde(rename = "superior")]
    Superior,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightIntensity {
    Fraca,
    Media,
    Forte,
}

impl LightIntensity {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Fraca => "fraca",
            Self::Media => "media",
            Self::Forte => "forte",
        }
    }
}

/// Full lighting setup for the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightingPlan {
    pub time_of_day: TimeOfDay,
    pub source: LightSource,
    pub quality: LightQuality,
    pub angle: LightAngle,
    pub intensity: LightIntensity,
    pub fill_light: bool,
    pub rim_light: bool,
}

impl Default for LightingPlan {
    fn default() -> Self {
        Self {
            time_of_day: TimeOfDay::MeioDia,
            source: LightSource::NaturalDaylight,
            quality: LightQuality::Difusa,
            angle: LightAngle::Frontal,
            intensity: LightIntensity::Media,
            fill_light: true,
            rim_light: false,
        }
    }
}

/// Camera placement relative to the subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraAngle {
    EyeLevel,
    ShoulderLevel,
    HipLevel,
    KneeLevel,
    GroundLevel,
    LowAngle,
    HighAngle,
    DutchAngle,
    OverTheShoulder,
    OverTheHip,
    EstablishingShot,
    ExtremeWideShot,
    WideShot,
    FullShot,
    MediumWideShot,
    CowboyShot,
    MediumShot,
    MediumCloseUp,
    CloseUp,
    ExtremeCloseUp,
    PovShot,
    BirdsEyeView,
    AerialShot,
    ArcShot,
    DollyZoom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LensDistortion {
    None,
    Barrel,
    Pincushion,
    Fisheye,
}

impl LensDistortion {
    fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Barrel => "barrel",
            Self::Pincushion => "pincushion",
            Self::Fisheye => "fisheye",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChromaticAberration {
    None,
    Low,
    High,
}

impl ChromaticAberration {
    fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::High => "high",
        }
    }
}

/// Camera body, glass and exposure parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraRig {
    pub camera_body: String,
    pub camera_angle: CameraAngle,
    pub lens: String,
    pub sensor: String,
    pub aperture: String,
    pub shutter_speed: String,
    pub iso: String,
    pub lens_distortion: LensDistortion,
    pub chromatic_aberration: ChromaticAberration,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            camera_body: "canon_eos_r5".to_string(),
            camera_angle: CameraAngle::EyeLevel,
            lens: "85mm_f1.4".to_string(),
            sensor: "full_frame".to_string(),
            aperture: "f/2.8".to_string(),
            shutter_speed: "1/250s".to_string(),
            iso: "100".to_string(),
            lens_distortion: LensDistortion::None,
            chromatic_aberration: ChromaticAberration::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BokehQuality {
    Cremoso,
    Nervoso,
    VintageRemolino,
}

impl BokehQuality {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Cremoso => "cremoso",
            Self::Nervoso => "nervoso",
            Self::VintageRemolino => "vintage remolino",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BokehIntensity {
    Subtle,
    Medium,
    Strong,
}

impl BokehIntensity {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Subtle => "subtle",
            Self::Medium => "medium",
            Self::Strong => "strong",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthOfField {
    pub focus_point: String,
    pub bokeh_quality: BokehQuality,
    pub bokeh_intensity: BokehIntensity,
}

impl Default for DepthOfField {
    fn default() -> Self {
        Self {
            focus_point: "os olhos do sujeito".to_string(),
            bokeh_quality: BokehQuality::Cremoso,
            bokeh_intensity: BokehIntensity::Medium,
        }
    }
}

/// Base photographic style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotographicStyle {
    Nenhum,
    FotografiaDeRua,
    ModaEditorial,
    RetratoNatural,
    GlamourHollywood,
    Lifestyle,
    Cinematografico,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StylePlan {
    pub base: PhotographicStyle,
    pub custom_mix: String,
}

impl Default for PhotographicStyle {
    fn default() -> Self {
        Self::Nenhum
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtmosphereKind {
    None,
    Fog,
    Mist,
    Rain,
    DustParticles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtmosphereDensity {
    Light,
    Medium,
    Heavy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atmosphere {
    pub kind: AtmosphereKind,
    pub density: AtmosphereDensity,
    pub light_physics: String,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self {
            kind: AtmosphereKind::None,
            density: AtmosphereDensity::Medium,
            light_physics: String::new(),
        }
    }
}

/// Narrative sequencing across a multi-image generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceType {
    None,
    Timeline,
    StyleVariation,
    PsychologicalStates,
}

impl SequenceType {
    fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Timeline => "timeline",
            Self::StyleVariation => "style_variation",
            Self::PsychologicalStates => "psychological_states",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conceptual {
    pub prompt: String,
    pub sequence_type: SequenceType,
    pub sequence_description: String,
}

impl Default for Conceptual {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            sequence_type: SequenceType::None,
            sequence_description: String::new(),
        }
    }
}

/// Classic film stock emulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilmStock {
    None,
    KodakPortra400,
    FujiVelvia50,
    IlfordHp5400,
    KodakEktar100,
    Cinestill800t,
    Polaroid600,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlareType {
    None,
    Subtle,
    Dramatic,
    Imperfect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShakeLevel {
    None,
    Slight,
    Heavy,
}

impl ShakeLevel {
    fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Slight => "slight",
            Self::Heavy => "heavy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrainLevel {
    None,
    Fine,
    Medium,
    Heavy,
}

impl GrainLevel {
    fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Fine => "fine",
            Self::Medium => "medium",
            Self::Heavy => "heavy",
        }
    }
}

/// Realistic optical and film defects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoDefects {
    pub dust_and_scratches: bool,
    pub lens_flare: FlareType,
    pub camera_shake: ShakeLevel,
    pub light_leaks: bool,
    pub film_grain: GrainLevel,
    pub sensor_spots: bool,
    pub negative_scratches: bool,
}

impl Default for PhotoDefects {
    fn default() -> Self {
        Self {
            dust_and_scratches: false,
            lens_flare: FlareType::None,
            camera_shake: ShakeLevel::None,
            light_leaks: false,
            film_grain: GrainLevel::None,
            sensor_spots: false,
            negative_scratches: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmPlan {
    pub stock: FilmStock,
    pub defects: PhotoDefects,
}

impl Default for FilmPlan {
    fn default() -> Self {
        Self {
            stock: FilmStock::None,
            defects: PhotoDefects::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    Hd,
    Qhd,
    Uhd4k,
    Uhd8k,
}

impl Resolution {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Hd => "hd",
            Self::Qhd => "qhd",
            Self::Uhd4k => "uhd4k",
            Self::Uhd8k => "uhd8k",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepsLevel {
    Low,
    Medium,
    High,
    Ultra,
}

impl StepsLevel {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Ultra => "ultra",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputPlan {
    pub resolution: Resolution,
    pub steps: StepsLevel,
}

impl Default for OutputPlan {
    fn default() -> Self {
        Self {
            resolution: Resolution::Uhd8k,
            steps: StepsLevel::Ultra,
        }
    }
}

/// Engine variant used for pure generation (no base images)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationEngine {
    Imagen4,
    NanoExperimental,
}

impl Default for GenerationEngine {
    fn default() -> Self {
        Self::Imagen4
    }
}

/// Full studio request: the most detailed configuration bundle in the app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotorealisticRequest {
    pub prompt: String,
    pub environment: String,
    #[serde(default)]
    pub base_images: Vec<UploadedImage>,
    pub number_of_images: u32,
    #[serde(default)]
    pub auto_equip: bool,
    #[serde(default)]
    pub generation_engine: GenerationEngine,
    #[serde(default)]
    pub negative_prompt: String,
    pub lighting: LightingPlan,
    pub camera: CameraRig,
    pub depth_of_field: DepthOfField,
    pub style: StylePlan,
    pub atmosphere: Atmosphere,
    #[serde(default)]
    pub material_properties: String,
    pub conceptual: Conceptual,
    pub output: OutputPlan,
    pub film: FilmPlan,
}

impl Default for PhotorealisticRequest {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            environment: String::new(),
            base_images: Vec::new(),
            number_of_images: 1,
            auto_equip: false,
            generation_engine: GenerationEngine::default(),
            negative_prompt: String::new(),
            lighting: LightingPlan::default(),
            camera: CameraRig::default(),
            depth_of_field: DepthOfField::default(),
            style: StylePlan::default(),
            atmosphere: Atmosphere::default(),
            material_properties: String::new(),
            conceptual: Conceptual::default(),
            output: OutputPlan::default(),
            film: FilmPlan::default(),
        }
    }
}

/// How many images the request actually produces. Edit operations (base
/// images present) produce exactly one result; a narrative sequence needs at
/// least two frames to sequence.
pub fn resolved_image_count(request: &PhotorealisticRequest) -> u32 {
    if !request.base_images.is_empty() {
        return 1;
    }
    if request.conceptual.sequence_type != SequenceType::None {
        return request.number_of_images.max(2);
    }
    request.number_of_images
}

pub fn lighting_description(lighting: &LightingPlan) -> String {
    let time_of_day = match lighting.time_of_day {
        TimeOfDay::Amanhecer => "no amanhecer, com luz suave e quente e sombras longas.",
        TimeOfDay::MeioDia => "ao meio-dia, sob luz solar direta e forte, com sombras curtas e duras.",
        TimeOfDay::PorDoSol => "durante o pôr do sol (golden hour), com uma luz dourada, quente e difusa.",
        TimeOfDay::HoraAzul => "na hora azul, após o pôr do sol, com uma luz ambiente fria, azulada e suave.",
        TimeOfDay::Noite => "à noite, com fontes de luz limitadas, exigindo iluminação artificial ou lunar.",
    };

    let source = match lighting.source {
        LightSource::NaturalDaylight => "luz natural do dia, vinda de uma janela ou ao ar livre em um dia nublado.",
        LightSource::GoldenHourSun => "luz direta do sol durante a golden hour, criando um brilho quente e reflexos na lente (lens flare).",
        LightSource::StudioFlash => "flash de estúdio profissional (ex: beauty dish, softbox).",
        LightSource::RingLight => "uma luz de anel (ring light), criando um brilho característico nos olhos (catchlights).",
        LightSource::NeonCity => "luzes de neon de uma cidade noturna, criando reflexos coloridos e uma atmosfera cyberpunk.",
        LightSource::DramaticSpotlight => "um holofote (spotlight) dramático, criando um forte contraste entre luz e sombra (chiaroscuro).",
        LightSource::TungstenBulb => "luz de uma lâmpada de tungstênio, criando um ambiente muito quente e alaranjado.",
        LightSource::FluorescentLight => "luz de uma lâmpada fluorescente, com um tom levemente esverdeado e uma sensação de ambiente de escritório ou industrial.",
        LightSource::LedPanel => "luz de um painel de LED moderno, que pode ser ajustado para qualquer cor, mas geralmente é neutro e limpo.",
        LightSource::Candlelight => "luz de velas, que é muito quente, suave, bruxuleante e cria sombras longas e dançantes.",
    };

    let quality = match lighting.quality {
        LightQuality::Dura => "A luz é dura, criando sombras nítidas e alto contraste.",
        LightQuality::Difusa => "A luz é difusa e suave, envolvendo o sujeito e minimizando as sombras.",
    };

    let angle = match lighting.angle {
        LightAngle::Frontal => "A luz principal vem da frente, iluminando o sujeito diretamente.",
        LightAngle::Lateral => "A luz principal vem do lado (iluminação Rembrandt ou split), criando profundidade e drama.",
        LightAngle::ContraLuz => "A luz principal vem de trás do sujeito (contra-luz), criando uma silhueta ou um brilho de contorno.",
        LightAngle::Superior => "A luz vem de cima (iluminação borboleta), criando uma sombra abaixo do nariz.",
    };

    let intensity = format!("A intensidade da luz principal é {}.", lighting.intensity.as_str());

    let fill = if lighting.fill_light {
        "Use uma luz de preenchimento suave para clarear as sombras no lado oposto à luz principal."
    } else {
        "Não use luz de preenchimento, permitindo que as sombras sejam profundas e dramáticas."
    };

    let rim = if lighting.rim_light {
        "Adicione uma luz de contorno (rim light) por trás do sujeito para separá-lo do fundo com um brilho sutil."
    } else {
        "Não use luz de contorno."
    };

    format!(
        "A cena ocorre {} A fonte de luz principal simula {} {} {} {} {} {}",
        time_of_day, source, quality, angle, intensity, fill, rim
    )
}

pub fn atmosphere_and_materials(atmosphere: &Atmosphere, material_properties: &str) -> String {
    let mut prompt = String::new();
    let density = match atmosphere.density {
        AtmosphereDensity::Light => "leve",
        AtmosphereDensity::Medium => "média",
        AtmosphereDensity::Heavy => "densa",
    };

    match atmosphere.kind {
        AtmosphereKind::Fog => {
            prompt.push_str(&format!(
                " A cena está envolta em uma neblina {}, difundindo a luz e reduzindo a visibilidade.",
                density
            ));
        }
        AtmosphereKind::Mist => {
            prompt.push_str(&format!(
                " Uma névoa {} paira no ar, criando uma atmosfera suave e úmida e raios de luz visíveis (god rays).",
                density
            ));
        }
        AtmosphereKind::Rain => {
            prompt.push_str(&format!(
                " Está caindo uma chuva {}, com superfícies molhadas e reflexivas, e possíveis gotas visíveis.",
                density
            ));
        }
        AtmosphereKind::DustParticles => {
            prompt.push_str(&format!(
                " Partículas de poeira {} estão suspensas no ar, capturando a luz e criando um efeito de luz volumétrica.",
                density
            ));
        }
        AtmosphereKind::None => {}
    }

    let materials = material_properties.trim();
    let physics = atmosphere.light_physics.trim();
    if !materials.is_empty() || !physics.is_empty() {
        prompt.push_str(" A simulação física deve ser 99,99% precisa, com atenção rigorosa aos detalhes.");
    }
    if !materials.is_empty() {
        prompt.push_str(&format!(" Propriedades de materiais a simular: {}.", materials));
    }
    if !physics.is_empty() {
        prompt.push_str(&format!(" Simule a física da luz com estas características: {}.", physics));
    }

    prompt
}

pub fn film_and_defects(film: &FilmPlan) -> String {
    let mut prompt = String::new();

    let stock = match film.stock {
        FilmStock::KodakPortra400 => "Simule as cores e o contraste do filme Kodak Portra 400, com tons de pele quentes e realistas e saturação moderada.",
        FilmStock::FujiVelvia50 => "Simule as cores vibrantes e a alta saturação do filme Fuji Velvia 50, ideal para paisagens com verdes e azuis intensos.",
        FilmStock::IlfordHp5400 => "Simule o filme preto e branco Ilford HP5 400, com granulação clássica, alto contraste e uma ampla gama de tons de cinza.",
        FilmStock::KodakEktar100 => "Simule as cores do filme Kodak Ektar 100, com saturação viva e a granulação mais fina do mundo.",
        FilmStock::Cinestill800t => "Simule o filme CineStill 800T, com seu característico brilho avermelhado (halation) em torno das luzes e uma estética cinematográfica de filme de tungstênio.",
        FilmStock::Polaroid600 => "Simule uma foto instantânea Polaroid 600, com cores suaves e sonhadoras, contraste baixo e a clássica moldura branca.",
        FilmStock::None => "",
    };
    if !stock.is_empty() {
        prompt.push_str(&format!(" {}", stock));
    }

    if film.defects.film_grain != GrainLevel::None {
        prompt.push_str(&format!(
            " Adicione uma granulação de filme {}.",
            film.defects.film_grain.as_str()
        ));
    }
    match film.defects.lens_flare {
        FlareType::Subtle => {
            prompt.push_str(" Inclua um lens flare sutil vindo da fonte de luz principal.")
        }
        FlareType::Dramatic => {
            prompt.push_str(" Inclua um lens flare dramático vindo da fonte de luz principal.")
        }
        FlareType::Imperfect => prompt.push_str(
            " Inclua um lens flare imperfeito e realista, com artefatos e anéis assimétricos vindo da fonte de luz principal.",
        ),
        FlareType::None => {}
    }
    if film.defects.camera_shake != ShakeLevel::None {
        prompt.push_str(&format!(
            " A imagem deve ter um leve borrão de movimento como se fosse tirada com um {} tremor da câmera.",
            film.defects.camera_shake.as_str()
        ));
    }
    if film.defects.light_leaks {
        prompt.push_str(
            " Adicione vazamentos de luz (light leaks) sutis nas bordas da imagem, como em uma câmera de filme antiga.",
        );
    }
    if film.defects.dust_and_scratches {
        prompt.push_str(
            " Inclua pequenas partículas de poeira e arranhões finos, como em um negativo de filme escaneado.",
        );
    }
    if film.defects.sensor_spots {
        prompt.push_str(
            " Adicione pequenas manchas de poeira no sensor, visíveis em áreas de cor uniforme como o céu.",
        );
    }
    if film.defects.negative_scratches {
        prompt.push_str(
            " Inclua arranhões finos e verticais, como em um negativo de filme mal manuseado.",
        );
    }

    prompt
}

/// Conceptual/narrative section. `image_count` is the already-resolved
/// output count, so a configured sequence always materializes.
pub fn conceptual_prompt(conceptual: &Conceptual, image_count: u32) -> String {
    let mut prompt = String::new();
    let concept = conceptual.prompt.trim();
    if !concept.is_empty() {
        prompt.push_str(&format!(
            " A imagem deve explorar o seguinte conceito abstrato ou narrativo: {}.",
            concept
        ));
    }
    if conceptual.sequence_type != SequenceType::None && image_count > 1 {
        prompt.push_str(&format!(
            " Gere uma série de {} imagens como uma sequência narrativa do tipo '{}'.",
            image_count,
            conceptual.sequence_type.as_str()
        ));
        let description = conceptual.sequence_description.trim();
        if !description.is_empty() {
            prompt.push_str(&format!(" Siga esta diretriz para a sequência: {}", description));
        } else {
            match conceptual.sequence_type {
                SequenceType::Timeline => prompt.push_str(
                    " Cada imagem deve representar um período de tempo diferente (passado, presente, futuro).",
                ),
                SequenceType::StyleVariation => prompt.push_str(
                    " Cada imagem deve ter uma variação de estilo artístico (ex: uma foto, uma pintura, um esboço).",
                ),
                SequenceType::PsychologicalStates => prompt.push_str(
                    " Cada imagem deve retratar um estado psicológico diferente (ex: calma, ansiedade, alegria).",
                ),
                SequenceType::None => {}
            }
        }
    }
    prompt
}

pub fn camera_body_description(camera: &str) -> String {
    match camera {
        "canon_eos_r5" => "uma câmera Canon EOS R5, conhecida por suas cores ricas e realistas (Canon Color Science) e altíssima resolução de 45MP.".to_string(),
        "sony_a7_iv" => "uma câmera Sony α7 IV, famosa por seu autofoco de ponta e excelente performance em baixa luz.".to_string(),
        "fujifilm_x_t4" => "uma câmera Fujifilm X-T4, com suas aclamadas simulações de filme e cor característica.".to_string(),
        "leica_m11" => "uma câmera Leica M11, conhecida por seu design icônico, operação manual (rangefinder) e a \"Leica look\" com microcontraste único.".to_string(),
        "hasselblad_x1d_ii" => "uma câmera de médio formato Hasselblad X1D II, que produz imagens com profundidade de cor incrível e transições de tons suaves.".to_string(),
        "polaroid_sx70" => "uma câmera instantânea Polaroid SX-70, resultando em uma imagem com cores suaves, sonhadoras e a clássica moldura branca.".to_string(),
        "apple_iphone_15_pro" => "um Apple iPhone 15 Pro, simulando fotografia computacional com Deep Fusion e Smart HDR, resultando em imagens nítidas e bem expostas.".to_string(),
        "holga_120n" => "uma toy camera Holga 120N, resultando em uma imagem de baixa fidelidade (lo-fi) com vinhetas fortes, vazamentos de luz e foco suave.".to_string(),
        other => format!("uma câmera {}", humanize(other)),
    }
}

pub fn lens_description(lens: &str) -> String {
    format!("Usando uma lente {}.", humanize(lens))
}

pub fn sensor_description(sensor: &str) -> String {
    format!("Com um sensor {}.", humanize(sensor))
}

pub fn camera_angle_description(angle: CameraAngle) -> &'static str {
    match angle {
        CameraAngle::EyeLevel => "A câmera está no nível dos olhos do sujeito, criando uma perspectiva neutra e direta.",
        CameraAngle::ShoulderLevel => "A câmera está no nível dos ombros do sujeito, uma perspectiva comum e ligeiramente elevada.",
        CameraAngle::HipLevel => "A câmera está posicionada na altura do quadril, frequentemente usada para enquadrar ações ou posturas.",
        CameraAngle::KneeLevel => "A câmera está no nível dos joelhos, útil para capturar movimento ou dar uma sensação de superioridade ao sujeito.",
        CameraAngle::GroundLevel => "A câmera está no chão, olhando para cima, para uma perspectiva dramática e exagerada.",
        CameraAngle::LowAngle => "Um ângulo baixo (contrapicada), com a câmera olhando para cima, fazendo o sujeito parecer poderoso e imponente.",
        CameraAngle::HighAngle => "Um ângulo alto (picada), com a câmera olhando para baixo, fazendo o sujeito parecer vulnerável ou pequeno.",
        CameraAngle::DutchAngle => "Um ângulo holandês, com a câmera inclinada para criar uma sensação de desorientação ou tensão.",
        CameraAngle::OverTheShoulder => "Um plano sobre o ombro (OTS), mostrando a cena da perspectiva de trás de um personagem.",
        CameraAngle::OverTheHip => "Um plano sobre o quadril, similar ao OTS, mas de uma posição mais baixa.",
        CameraAngle::EstablishingShot => "Um plano de estabelecimento, mostrando a localização geral antes de focar nos detalhes.",
        CameraAngle::ExtremeWideShot => "Um plano geral extremo (EWS), onde o sujeito é pequeno em um vasto cenário.",
        CameraAngle::WideShot => "Um plano geral (WS), mostrando o sujeito por inteiro, com amplo espaço ao redor.",
        CameraAngle::FullShot => "Um plano inteiro (FS), enquadrando o sujeito da cabeça aos pés.",
        CameraAngle::MediumWideShot => "Um plano americano (MWS), enquadrando dos joelhos para cima.",
        CameraAngle::CowboyShot => "Um plano cowboy, enquadrando do meio da coxa para cima, clássico de westerns.",
        CameraAngle::MediumShot => "Um plano médio (MS), da cintura para cima, equilibrando sujeito e cenário.",
        CameraAngle::MediumCloseUp => "Um plano médio próximo (MCU), do peito para cima, focando mais nas expressões.",
        CameraAngle::CloseUp => "Um primeiro plano (CU), focado no rosto para capturar emoções intensas.",
        CameraAngle::ExtremeCloseUp => "Um primeiríssimo plano (ECU), focando em um detalhe específico, como os olhos.",
        CameraAngle::PovShot => "Um plano de ponto de vista (POV), mostrando a cena através dos olhos de um personagem.",
        CameraAngle::BirdsEyeView => "Uma visão de pássaro (top-down), diretamente de cima, como um mapa.",
        CameraAngle::AerialShot => "Um plano aéreo, capturado de grande altura (drone, helicóptero) para mostrar a escala.",
        CameraAngle::ArcShot => "Um plano em arco, onde a câmera se move em um arco ao redor do sujeito.",
        CameraAngle::DollyZoom => "Um dolly zoom (efeito Vertigo), onde a câmera se move e o zoom muda simultaneamente, distorcendo a perspectiva.",
    }
}

pub fn photographic_style_description(style: PhotographicStyle) -> &'static str {
    match style {
        PhotographicStyle::Nenhum => "",
        PhotographicStyle::FotografiaDeRua => "No estilo de fotografia de rua, espontânea e crua.",
        PhotographicStyle::ModaEditorial => "No estilo de moda editorial, com poses dramáticas e iluminação de alta qualidade.",
        PhotographicStyle::RetratoNatural => "No estilo de retrato com luz natural, suave e lisonjeiro.",
        PhotographicStyle::GlamourHollywood => "No estilo de glamour clássico de Hollywood, com iluminação contrastada e poses elegantes.",
        PhotographicStyle::Lifestyle => "No estilo lifestyle, capturando momentos autênticos e casuais.",
        PhotographicStyle::Cinematografico => "Com uma estética cinematográfica, usando color grading e proporção widescreen.",
    }
}

/// Assemble the full master prompt for a studio generation. The section
/// order is fixed; see the module docs.
pub fn compose(request: &PhotorealisticRequest, profile_name: Option<&str>) -> String {
    let mut prompt = format!(
        "**Master Prompt: Geração de Imagem Fotorrealista de Alta Qualidade**\n\n\
         **Objetivo:** Criar uma imagem digital com o máximo de realismo, simulando uma fotografia profissional. A atenção aos detalhes é crucial.\n\n\
         **Instrução Principal:** {}\n\n\
         **Ambiente e Contexto:** A cena se passa em/no {}.",
        request.prompt, request.environment
    );

    if let Some(name) = profile_name {
        prompt.push_str(&format!(
            "\n\n**Consistência de Perfil:** O sujeito principal deve ser renderizado com a aparência e características consistentes com o perfil de referência '{}'.",
            name
        ));
    }

    if request.auto_equip {
        prompt.push_str(
            "\n\n**Equipamento (Automático):** A IA deve selecionar a combinação ideal de câmera, lente e configurações para alcançar um resultado fotorrealista de nível profissional, otimizado para a cena descrita.",
        );
    } else {
        prompt.push_str("\n\n**Configuração de Câmera e Lente:**");
        prompt.push_str(&format!(
            "\n- **Câmera:** Capturado com {}.",
            camera_body_description(&request.camera.camera_body)
        ));
        prompt.push_str(&format!(
            "\n- **Ângulo da Câmera:** {}.",
            camera_angle_description(request.camera.camera_angle)
        ));
        prompt.push_str(&format!("\n- **Lente:** {}.", lens_description(&request.camera.lens)));
        prompt.push_str(&format!("\n- **Sensor:** {}.", sensor_description(&request.camera.sensor)));
        prompt.push_str(&format!(
            "\n- **Parâmetros:** Abertura {}, Velocidade do Obturador {}, ISO {}.",
            request.camera.aperture, request.camera.shutter_speed, request.camera.iso
        ));
        if request.camera.lens_distortion != LensDistortion::None {
            prompt.push_str(&format!(
                "\n- **Distorção da Lente:** Incluir distorção do tipo {}.",
                request.camera.lens_distortion.as_str()
            ));
        }
        if request.camera.chromatic_aberration != ChromaticAberration::None {
            prompt.push_str(&format!(
                "\n- **Aberração Cromática:** Incluir {} aberração cromática nas bordas de alto contraste.",
                request.camera.chromatic_aberration.as_str()
            ));
        }
    }

    prompt.push_str("\n\n**Iluminação e Atmosfera:**");
    prompt.push_str(&format!("\n- **Iluminação Principal:** {}", lighting_description(&request.lighting)));
    prompt.push_str(&atmosphere_and_materials(&request.atmosphere, &request.material_properties));

    prompt.push_str("\n\n**Profundidade de Campo e Foco:**");
    prompt.push_str(&format!(
        "\n- **Ponto de Foco:** O foco nítido deve estar em '{}'.",
        request.depth_of_field.focus_point
    ));
    prompt.push_str(&format!(
        "\n- **Bokeh:** O desfoque de fundo (bokeh) deve ter intensidade {} e uma qualidade {}, com orbs suaves e agradáveis.",
        request.depth_of_field.bokeh_intensity.as_str(),
        request.depth_of_field.bokeh_quality.as_str()
    ));

    let conceptual = conceptual_prompt(&request.conceptual, resolved_image_count(request));
    if !conceptual.is_empty() {
        prompt.push_str(&format!("\n\n**Conceito e Narrativa:**{}", conceptual));
    }

    let style_desc = photographic_style_description(request.style.base);
    if !style_desc.is_empty() || !request.style.custom_mix.is_empty() {
        prompt.push_str("\n\n**Estilo Fotográfico:**");
        if !style_desc.is_empty() {
            prompt.push_str(&format!("\n- **Base:** {}", style_desc));
        }
        if !request.style.custom_mix.is_empty() {
            prompt.push_str(&format!("\n- **Mistura Customizada:** {}", request.style.custom_mix));
        }
    }

    let film = film_and_defects(&request.film);
    if !film.is_empty() {
        prompt.push_str(&format!("\n\n**Emulação de Filme e Defeitos Ópticos:**{}", film));
    }

    if !request.negative_prompt.is_empty() {
        prompt.push_str(&format!(
            "\n\n**Prompt Negativo (Exclusões):** Evitar estritamente os seguintes elementos: {}.",
            request.negative_prompt
        ));
    }

    prompt.push_str(&format!(
        "\n\n**Qualidade de Saída:** A imagem final deve ser renderizada em ultra-alta definição (UHD 8K), simulando uma resolução de {} e {} passos de renderização para garantir detalhes finos e ausência de artefatos.",
        request.output.resolution.as_str(),
        request.output.steps.as_str()
    ));

    prompt
}

/// One-sentence preview of the configured shot, used by the studio panel
/// before committing to a full generation.
pub fn scene_preview(request: &PhotorealisticRequest) -> String {
    let mut prompt = format!(
        "Descreva em uma frase como seria uma foto com as seguintes características: {} no seguinte ambiente: {}.",
        request.prompt, request.environment
    );
    prompt.push_str(&format!(" {}", lighting_description(&request.lighting)));
    prompt.push_str(&format!(" Capturado com {}.", camera_body_description(&request.camera.camera_body)));
    prompt.push_str(&format!(" {}.", lens_description(&request.camera.lens)));
    prompt.push_str(&conceptual_prompt(&request.conceptual, resolved_image_count(request)));
    prompt.push_str(&atmosphere_and_materials(&request.atmosphere, &request.material_properties));
    prompt.push_str(&film_and_defects(&request.film));
    let style_desc = photographic_style_description(request.style.base);
    if !style_desc.is_empty() {
        prompt.push_str(&format!(" {}", style_desc));
    }
    if !request.style.custom_mix.is_empty() {
        prompt.push_str(&format!(" {}.", request.style.custom_mix));
    }
    prompt.push_str(" Responda apenas com a descrição da cena.");
    prompt
}
