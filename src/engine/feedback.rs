use crate::catalog::PoseTemplate;
use crate::engine::types::{Feedback, Language};

/// 按评分档位生成辅导反馈，档位互斥：
/// <60 基础纠正，60-79 微调，≥80 仅有优点肯定。
/// "dynamic"/"elegant" 类别模板额外追加一条改进提示（只追加到
/// improvements，≥80 档该列表为空，提示随之省略）。
pub fn feedback(template: &PoseTemplate, score: u8, language: Language) -> Feedback {
    let mut improvements: Vec<String> = Vec::new();
    let mut strong_points: Vec<String> = Vec::new();

    if score < 60 {
        match language {
            Language::Zh => {
                improvements.push("注意基础姿势的准确性".to_string());
                improvements.push("参考姿势指导调整身体角度".to_string());
            }
            Language::En => {
                improvements.push("Focus on basic pose accuracy".to_string());
                improvements.push("Adjust body angles according to guide".to_string());
            }
        }
    } else if score < 80 {
        match language {
            Language::Zh => {
                improvements.push("微调手臂位置".to_string());
                improvements.push("保持身体稳定".to_string());
            }
            Language::En => {
                improvements.push("Fine-tune arm positioning".to_string());
                improvements.push("Maintain body stability".to_string());
            }
        }
    } else {
        match language {
            Language::Zh => {
                strong_points.push("姿势很标准！".to_string());
                strong_points.push("身体角度很好".to_string());
            }
            Language::En => {
                strong_points.push("Great pose alignment!".to_string());
                strong_points.push("Excellent body angles".to_string());
            }
        }
    }

    if score < 80 {
        if template.id.contains("dynamic") {
            improvements.push(match language {
                Language::Zh => "增加动作的爆发力".to_string(),
                Language::En => "Add more dynamic energy".to_string(),
            });
        } else if template.id.contains("elegant") {
            improvements.push(match language {
                Language::Zh => "保持优雅的线条".to_string(),
                Language::En => "Maintain graceful lines".to_string(),
            });
        }
    }

    Feedback {
        improvements,
        strong_points,
    }
}

/// 开拍前的指导提示：模板动作步骤逐条编号，再附构图与机位提示。
pub fn coaching_hints(template: &PoseTemplate, language: Language) -> Vec<String> {
    let mut hints: Vec<String> = Vec::new();

    for (index, step) in template.sequence.iter().enumerate() {
        let step_text = bilingual_part(step, language);
        hints.push(match language {
            Language::Zh => format!("步骤 {}: {}", index + 1, step_text),
            Language::En => format!("Step {}: {}", index + 1, step_text),
        });
    }

    if let Some(hint) = &template.camera_hint {
        if let Some(framing) = &hint.framing {
            hints.push(match language {
                Language::Zh => format!("构图: {}", bilingual_part(framing, language)),
                Language::En => format!("Framing: {}", bilingual_part(framing, language)),
            });
        }
        if let Some(height) = &hint.height {
            hints.push(match language {
                Language::Zh => format!("机位: {}", bilingual_part(height, language)),
                Language::En => format!("Camera height: {}", bilingual_part(height, language)),
            });
        }
    }

    hints
}

/// 从 "中文 / English" 双语串中取出对应语言的一半；
/// 无分隔符时原样返回。
pub fn bilingual_part(text: &str, language: Language) -> &str {
    let mut parts = text.splitn(2, " / ");
    let zh = parts.next().unwrap_or(text);
    match language {
        Language::Zh => zh,
        Language::En => parts.next().unwrap_or(zh),
    }
}
